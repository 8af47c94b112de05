use crate::filter::{FilterState, FilterType};
use crate::record::StdfRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Receiver of filter state updates
pub trait FilterRegistry {
    fn publish(&mut self, state: FilterState);
}

/// Collects every published state, in order
impl FilterRegistry for Vec<FilterState> {
    fn publish(&mut self, state: FilterState) {
        self.push(state);
    }
}

/// Applies published filter states to a fixed list of records
///
/// Keeps the indices of the records that pass every active filter. A
/// strengthened update of an already active filter only re-checks the records
/// that were visible before, since a narrower selection can only remove
/// matches.
#[derive(Debug)]
pub struct RecordFilterRegistry {
    records: Vec<StdfRecord>,
    filters: BTreeMap<FilterType, FilterState>,
    visible: Vec<usize>,
    evaluations: usize,
}

impl RecordFilterRegistry {
    pub fn new(records: Vec<StdfRecord>) -> Self {
        let visible = (0..records.len()).collect();
        Self {
            records,
            filters: BTreeMap::new(),
            visible,
            evaluations: 0,
        }
    }

    pub fn records(&self) -> &[StdfRecord] {
        &self.records
    }

    /// Indices of the records that pass every active filter
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &StdfRecord> + '_ {
        self.visible.iter().map(|&idx| &self.records[idx])
    }

    /// Total number of predicate calls made so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn passes(&mut self, idx: usize) -> bool {
        let record = &self.records[idx];
        let mut calls = 0;
        let pass = self
            .filters
            .values()
            .filter(|state| state.active)
            .all(|state| {
                calls += 1;
                state.matches(record)
            });
        self.evaluations += calls;
        pass
    }

    fn recompute(&mut self, candidates: Vec<usize>) {
        let visible: Vec<usize> = candidates
            .into_iter()
            .filter(|&idx| self.passes(idx))
            .collect();
        self.visible = visible;
    }
}

impl FilterRegistry for RecordFilterRegistry {
    fn publish(&mut self, state: FilterState) {
        let was_active = self
            .filters
            .get(&state.kind)
            .is_some_and(|previous| previous.active);
        let narrowing = state.active && state.strengthened && was_active;

        debug!(
            kind = %state.kind,
            active = state.active,
            strengthened = state.strengthened,
            narrowing,
            "filter state published"
        );

        self.filters.insert(state.kind, state);

        let candidates = if narrowing {
            std::mem::take(&mut self.visible)
        } else {
            (0..self.records.len()).collect()
        };
        self.recompute(candidates);
    }
}
