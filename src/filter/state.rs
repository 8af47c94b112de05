use super::predicate::{FilterPredicate, derive};
use crate::record::StdfRecord;
use crate::selection::{SelectionParseError, SelectionSet, parse_selection};
use serde::Serialize;
use std::fmt;

/// Identity of a filter within the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterType {
    TestNumber,
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::TestNumber => write!(f, "test-number"),
        }
    }
}

/// The unit published to a filter registry
#[derive(Debug, Clone, Serialize)]
pub struct FilterState {
    pub kind: FilterType,
    /// Inactive filters are treated as pass-through by the registry
    pub active: bool,
    /// The selection the predicate was derived from
    pub selection: SelectionSet,
    #[serde(skip)]
    pub predicate: FilterPredicate,
    /// The new selection is a subset of the previous one
    pub strengthened: bool,
}

impl FilterState {
    pub fn matches(&self, record: &StdfRecord) -> bool {
        self.predicate.matches(record)
    }
}

/// Derive the test number filter state for a selection
pub fn derive_state(selection: &SelectionSet, enabled: bool, strengthened: bool) -> FilterState {
    FilterState {
        kind: FilterType::TestNumber,
        active: enabled,
        selection: selection.clone(),
        predicate: derive(selection),
        strengthened,
    }
}

/// Parse `text` and derive the next state relative to `previous`
///
/// This is the stateless form of an edit: the caller keeps `previous` when an
/// error comes back.
pub fn update_selection(
    previous: &SelectionSet,
    text: &str,
    enabled: bool,
) -> Result<FilterState, SelectionParseError> {
    let selection = parse_selection(text)?;
    let strengthened = selection.is_subset_of(previous);
    Ok(derive_state(&selection, enabled, strengthened))
}
