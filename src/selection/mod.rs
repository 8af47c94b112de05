//! Test number selection parsing
//!
//! A selection is written as a comma separated list of test numbers and
//! inclusive ranges.
//!
//! # Syntax
//!
//! ```text
//! <int>              A single test number
//! <int>-<int>        Every test number from the first to the second, inclusive
//! token,token,...    The union of all tokens
//! ```
//!
//! The empty string selects nothing and is valid. A single malformed token, or
//! a range whose lower bound exceeds its upper bound, rejects the whole input.
//!
//! # Examples
//!
//! ```text
//! 0
//! 1,4
//! 1,2-3,7
//! ```

pub mod error;
pub mod parser;
pub mod set;

pub use error::{SELECTION_SYNTAX_HINT, SelectionParseError};
pub use parser::parse_selection;
pub use set::SelectionSet;
