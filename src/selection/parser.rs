use super::error::SelectionParseError;
use super::set::SelectionSet;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid number regex"));
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("valid range regex"));

/// A single comma separated unit of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(u32),
    Range(u32, u32),
}

impl Token {
    fn parse(s: &str) -> Result<Self, SelectionParseError> {
        if NUMBER_RE.is_match(s) {
            return Ok(Token::Number(parse_number(s)?));
        }

        if let Some(caps) = RANGE_RE.captures(s) {
            let min = parse_number(&caps[1])?;
            let max = parse_number(&caps[2])?;
            if min > max {
                return Err(SelectionParseError::DescendingRange(s.to_string()));
            }
            return Ok(Token::Range(min, max));
        }

        Err(SelectionParseError::UnrecognizedToken(s.to_string()))
    }
}

fn parse_number(digits: &str) -> Result<u32, SelectionParseError> {
    digits
        .parse::<u32>()
        .map_err(|_| SelectionParseError::NumberOutOfRange(digits.to_string()))
}

/// Parse a selection such as `1,2-3,7` into a set of test numbers
///
/// The empty string is valid and yields the empty set. Every other input must
/// consist only of well-formed tokens; the first bad token rejects the input.
pub fn parse_selection(text: &str) -> Result<SelectionSet, SelectionParseError> {
    if text.is_empty() {
        return Ok(SelectionSet::new());
    }

    let mut selection = SelectionSet::new();
    for part in text.split(',') {
        match Token::parse(part)? {
            Token::Number(n) => selection.insert(n),
            Token::Range(min, max) => selection.insert_range(min..=max),
        }
    }

    Ok(selection)
}

impl FromStr for SelectionSet {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selection(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SELECTION_SYNTAX_HINT;

    fn numbers(text: &str) -> Vec<u32> {
        parse_selection(text).unwrap().iter().collect()
    }

    #[test]
    fn test_empty_input_is_valid_and_empty() {
        let selection = parse_selection("").unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_parse_single_number() {
        assert_eq!(numbers("0"), vec![0]);
        assert_eq!(numbers("42"), vec![42]);
    }

    #[test]
    fn test_parse_list_and_ranges() {
        assert_eq!(numbers("1,4"), vec![1, 4]);
        assert_eq!(numbers("1,2-3,7"), vec![1, 2, 3, 7]);
        assert_eq!(numbers("5-5"), vec![5]);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(numbers("3,3,3"), vec![3]);
        assert_eq!(numbers("1-4,2-3,4"), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_leading_zeros_are_decimal() {
        assert_eq!(numbers("007,010"), vec![7, 10]);
    }

    #[test]
    fn test_descending_range_is_rejected() {
        assert_eq!(
            parse_selection("5-3"),
            Err(SelectionParseError::DescendingRange("5-3".to_string()))
        );
    }

    #[test]
    fn test_one_bad_token_rejects_everything() {
        assert_eq!(
            parse_selection("1,abc"),
            Err(SelectionParseError::UnrecognizedToken("abc".to_string()))
        );
        assert!(parse_selection("1,2-3,5-1").is_err());
    }

    #[test]
    fn test_malformed_shapes_are_rejected() {
        for text in [",", "1,", ",1", "1,,2", " 1", "1 ", "-1", "1-", "1-2-3", "a-b", "+3", "1.5"] {
            assert!(parse_selection(text).is_err(), "expected '{text}' to fail");
        }
    }

    #[test]
    fn test_overflowing_number_is_rejected() {
        assert_eq!(
            parse_selection("99999999999"),
            Err(SelectionParseError::NumberOutOfRange("99999999999".to_string()))
        );
        assert!(parse_selection("1-99999999999").is_err());
    }

    #[test]
    fn test_error_message_carries_syntax_hint() {
        let err = parse_selection("x").unwrap_err();
        assert!(err.to_string().starts_with(SELECTION_SYNTAX_HINT));
        assert_eq!(err.token(), "x");
    }

    #[test]
    fn test_from_str_matches_parse() {
        let selection: SelectionSet = "1,2-3,7".parse().unwrap();
        assert_eq!(selection, parse_selection("1,2-3,7").unwrap());
    }
}
