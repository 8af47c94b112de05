use thiserror::Error;

/// Diagnostic shown to the user whenever a selection fails to parse.
pub const SELECTION_SYNTAX_HINT: &str = "Input error. Valid values: 0 or 1,4 or 1,2-3,7 etc.";

/// Errors that can occur when parsing a test number selection
///
/// Any one of these rejects the whole input; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionParseError {
    #[error("{hint} Unrecognized token: '{0}'", hint = SELECTION_SYNTAX_HINT)]
    UnrecognizedToken(String),

    #[error("{hint} Range '{0}' is descending", hint = SELECTION_SYNTAX_HINT)]
    DescendingRange(String),

    #[error("{hint} Number '{0}' is too large", hint = SELECTION_SYNTAX_HINT)]
    NumberOutOfRange(String),
}

impl SelectionParseError {
    /// The offending token as it appeared in the input
    pub fn token(&self) -> &str {
        match self {
            SelectionParseError::UnrecognizedToken(t)
            | SelectionParseError::DescendingRange(t)
            | SelectionParseError::NumberOutOfRange(t) => t,
        }
    }

    /// The fixed diagnostic a caller should surface next to the input field
    pub fn hint(&self) -> &'static str {
        SELECTION_SYNTAX_HINT
    }
}
