use crate::record::StdfRecord;
use crate::selection::SelectionSet;
use std::fmt;
use std::sync::Arc;

/// A pure test over a single record
#[derive(Clone)]
pub struct FilterPredicate {
    test: Arc<dyn Fn(&StdfRecord) -> bool + Send + Sync>,
}

impl FilterPredicate {
    pub fn new(test: impl Fn(&StdfRecord) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Arc::new(test),
        }
    }

    pub fn matches(&self, record: &StdfRecord) -> bool {
        (self.test)(record)
    }
}

impl fmt::Debug for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FilterPredicate(..)")
    }
}

/// Build the test number membership predicate for `selection`
///
/// A record matches when it is a result record and one of its `TEST_NUM`
/// attributes is in the selection. The predicate owns a copy of the selection.
/// Whether the filter is enabled is tracked by the caller in
/// [`FilterState::active`](super::FilterState), never inside the predicate.
pub fn derive(selection: &SelectionSet) -> FilterPredicate {
    let selection = selection.clone();
    FilterPredicate::new(move |record| {
        record.is_result_record() && record.test_numbers().any(|n| selection.contains(n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordAttribute, StdfRecordType, TEST_NUM, create_ptr_record};

    fn selection(numbers: &[u32]) -> SelectionSet {
        numbers.iter().copied().collect()
    }

    #[test]
    fn test_matches_selected_test_number() {
        let predicate = derive(&selection(&[2, 5]));
        assert!(predicate.matches(&create_ptr_record(5, 1.0)));
        assert!(predicate.matches(&create_ptr_record(2, 1.0)));
        assert!(!predicate.matches(&create_ptr_record(6, 1.0)));
    }

    #[test]
    fn test_non_result_record_never_matches() {
        let predicate = derive(&selection(&[2, 5]));
        let tsr = StdfRecord::new(StdfRecordType::Tsr, vec![RecordAttribute::new(TEST_NUM, 5)]);
        assert!(!predicate.matches(&tsr));
    }

    #[test]
    fn test_any_test_num_attribute_can_match() {
        let predicate = derive(&selection(&[9]));
        let mpr = StdfRecord::new(
            StdfRecordType::Mpr,
            vec![
                RecordAttribute::new(TEST_NUM, 1),
                RecordAttribute::new(TEST_NUM, 9),
            ],
        );
        assert!(predicate.matches(&mpr));
    }

    #[test]
    fn test_record_without_test_number_does_not_match() {
        let predicate = derive(&selection(&[0]));
        let ftr = StdfRecord::new(StdfRecordType::Ftr, vec![RecordAttribute::new("RSLT", 0)]);
        assert!(!predicate.matches(&ftr));
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let predicate = derive(&SelectionSet::new());
        assert!(!predicate.matches(&create_ptr_record(0, 0.0)));
    }

    #[test]
    fn test_predicate_is_independent_of_later_mutation() {
        let mut current = selection(&[1]);
        let predicate = derive(&current);
        current.insert(2);
        assert!(predicate.matches(&create_ptr_record(1, 0.0)));
        assert!(!predicate.matches(&create_ptr_record(2, 0.0)));
    }
}
