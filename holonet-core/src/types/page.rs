//! Listing pages: raw upstream pages and our own paginated responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of an upstream listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpstreamPage {
    /// Total items across all pages
    #[serde(default)]
    pub count: u64,
    /// Locator of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// Locator of the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Raw items of this page, in upstream order
    #[serde(default)]
    pub results: Vec<Value>,
}

/// A page of results served to our own clients.
///
/// Always derived fresh from the full collection; never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total items across all pages
    pub count: usize,
    /// Current page (1-based)
    pub page: u32,
    /// Total pages, at least 1
    pub total_pages: u32,
    /// Next page, if there is one
    pub next_page: Option<u32>,
    /// Previous page, if there is one
    pub previous_page: Option<u32>,
    /// Items of this page
    pub results: Vec<T>,
}
