//! # Holonet Core
//!
//! Core types, errors, and traits shared by every Holonet crate.
//!
//! - **Types**: entity kinds, reference locators, full entities and their summaries
//! - **Errors**: the access-layer error taxonomy
//! - **Constants**: upstream defaults and page sizes
//! - **Traits**: [`Resource`], the typed view over one upstream entity kind
//!
//! ## Example
//!
//! ```rust
//! use holonet_core::{parse_locator, EntityKind};
//!
//! let id = parse_locator("https://swapi.dev/api/people/1/").unwrap();
//! assert_eq!(id, 1);
//! assert_eq!(EntityKind::Character.path(), "people");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{HolonetError, Result};
pub use traits::*;
pub use types::*;
