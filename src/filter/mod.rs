//! Test number filter
//!
//! Turns a [`SelectionSet`](crate::selection::SelectionSet) into a predicate
//! over STDF records and tracks the state a caller publishes to a
//! [`FilterRegistry`](crate::registry::FilterRegistry).
//!
//! The predicate matches a record when the record is a result record (PTR,
//! MPR or FTR) and carries a `TEST_NUM` attribute inside the selection. Each
//! published [`FilterState`] also says whether it is active and whether its
//! selection only narrowed the previous one.

pub mod controller;
pub mod predicate;
pub mod state;

pub use controller::TestNumberFilter;
pub use predicate::{FilterPredicate, derive};
pub use state::{FilterState, FilterType, derive_state, update_selection};
