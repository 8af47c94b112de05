use stdf_filter::selection::{
    SELECTION_SYNTAX_HINT, SelectionParseError, SelectionSet, parse_selection,
};

fn set(numbers: &[u32]) -> SelectionSet {
    numbers.iter().copied().collect()
}

#[test]
fn test_documented_examples_parse() {
    assert_eq!(parse_selection(""), Ok(set(&[])));
    assert_eq!(parse_selection("0"), Ok(set(&[0])));
    assert_eq!(parse_selection("1,4"), Ok(set(&[1, 4])));
    assert_eq!(parse_selection("1,2-3,7"), Ok(set(&[1, 2, 3, 7])));
    assert_eq!(parse_selection("3,3,3"), Ok(set(&[3])));
}

#[test]
fn test_rejections_are_whole_input() {
    assert!(matches!(
        parse_selection("5-3"),
        Err(SelectionParseError::DescendingRange(_))
    ));
    assert!(matches!(
        parse_selection("1,abc"),
        Err(SelectionParseError::UnrecognizedToken(_))
    ));
}

#[test]
fn test_non_empty_input_never_yields_valid_empty_set() {
    for text in [",", ",,", " ", "-", "a"] {
        assert!(
            parse_selection(text).is_err(),
            "'{text}' should not parse to an empty selection"
        );
    }
}

#[test]
fn test_parse_is_deterministic_and_order_insensitive() {
    let a = parse_selection("7,1-3,2").unwrap();
    let b = parse_selection("2,7,1-3").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, parse_selection("7,1-3,2").unwrap());
}

#[test]
fn test_canonical_form_reparses() {
    let selection = parse_selection("10-20,3,5,4,100").unwrap();
    assert_eq!(selection.to_string(), "3-5,10-20,100");
    assert_eq!(parse_selection(&selection.to_string()).unwrap(), selection);
}

#[test]
fn test_subset_properties() {
    let a = set(&[1, 2, 3]);
    assert!(a.is_subset_of(&a));
    assert!(set(&[]).is_subset_of(&a));
    assert!(set(&[1, 2]).is_subset_of(&a));
    assert!(!set(&[1, 2, 4]).is_subset_of(&a));
}

#[test]
fn test_full_width_range_is_cheap() {
    let everything = parse_selection("0-4294967295").unwrap();
    assert!(everything.contains(u32::MAX));
    assert_eq!(everything.len(), 1 << 32);
    assert_eq!(everything.ranges().len(), 1);

    let narrowed = parse_selection("0-10,4294967000-4294967295").unwrap();
    assert!(narrowed.is_subset_of(&everything));
    assert!(!everything.is_subset_of(&narrowed));
}

#[test]
fn test_error_display_includes_hint() {
    let err = parse_selection("1-").unwrap_err();
    assert!(err.to_string().contains(SELECTION_SYNTAX_HINT));
    assert_eq!(err.token(), "1-");
}
