//! TTL cache for Holonet upstream responses.
//!
//! Generic in-memory map with a fixed time-to-live and lazy expiration.

mod cache;

pub use cache::{CacheStats, TtlCache};
