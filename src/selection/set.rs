use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::RangeInclusive;

/// A validated set of test numbers
///
/// Stored as sorted, disjoint, non-adjacent inclusive intervals, so a wide
/// range such as `0-4294967295` costs a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ranges: Vec<RangeInclusive<u32>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, number: u32) {
        self.insert_range(number..=number);
    }

    /// Add every number in `range`, merging with overlapping or adjacent intervals
    pub fn insert_range(&mut self, range: RangeInclusive<u32>) {
        let (mut start, mut end) = range.into_inner();
        if start > end {
            return;
        }

        let first = self.ranges.partition_point(|r| r.end().saturating_add(1) < start);
        let mut last = first;
        while last < self.ranges.len() && *self.ranges[last].start() <= end.saturating_add(1) {
            start = start.min(*self.ranges[last].start());
            end = end.max(*self.ranges[last].end());
            last += 1;
        }

        self.ranges.splice(first..last, std::iter::once(start..=end));
    }

    pub fn contains(&self, number: u32) -> bool {
        self.interval_at(number).is_some_and(|r| *r.start() <= number)
    }

    /// Number of test numbers selected
    pub fn len(&self) -> u64 {
        self.ranges
            .iter()
            .map(|r| u64::from(r.end() - r.start()) + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The normalized intervals, ascending
    pub fn ranges(&self) -> &[RangeInclusive<u32>] {
        &self.ranges
    }

    /// Test numbers in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|r| r.clone())
    }

    /// Whether every number in `self` is also in `reference`
    ///
    /// Comparing a freshly parsed selection against the previous one tells
    /// whether the filter only got narrower. Both sides are normalized, so each
    /// interval of `self` must lie inside a single interval of `reference`.
    pub fn is_subset_of(&self, reference: &SelectionSet) -> bool {
        self.ranges.iter().all(|r| {
            reference
                .interval_at(*r.start())
                .is_some_and(|outer| outer.start() <= r.start() && r.end() <= outer.end())
        })
    }

    /// The first interval whose end is not below `number`
    fn interval_at(&self, number: u32) -> Option<&RangeInclusive<u32>> {
        let idx = self.ranges.partition_point(|r| *r.end() < number);
        self.ranges.get(idx)
    }
}

impl Extend<u32> for SelectionSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for n in iter {
            self.insert(n);
        }
    }
}

impl FromIterator<u32> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut selection = Self::new();
        selection.extend(iter);
        selection
    }
}

/// Canonical text form, e.g. `1-3,7,9,10`
///
/// Runs of three or more consecutive numbers collapse into a range. The output
/// parses back into the same set.
impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, r) in self.ranges.iter().enumerate() {
            let sep = if idx == 0 { "" } else { "," };
            let (start, end) = (*r.start(), *r.end());
            match end - start {
                0 => write!(f, "{sep}{start}")?,
                1 => write!(f, "{sep}{start},{end}")?,
                _ => write!(f, "{sep}{start}-{end}")?,
            }
        }
        Ok(())
    }
}

/// Serialized as the canonical text form
impl Serialize for SelectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
