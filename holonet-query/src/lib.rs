//! # Holonet Query
//!
//! In-memory list operations applied after a full collection is fetched:
//!
//! - [`filter`]: AND of per-field criteria, exact or substring, case-insensitive
//! - [`sort`]: stable sort on one field, unknown numbers last in both directions
//! - [`paginate`]: 1-based fixed-size pages
//!
//! Fields are closed per-kind enums, so an unknown field is a parse error at
//! the boundary rather than a runtime lookup failure.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod fields;
mod filter;
mod paginate;
mod sort;

pub use fields::*;
pub use filter::{filter, Filterable};
pub use paginate::paginate;
pub use sort::{sort, SortKey, SortOrder, Sortable};
