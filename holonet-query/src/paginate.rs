//! Fixed-size pagination.

use holonet_core::types::Paginated;

/// Cuts one 1-based page out of `items`.
///
/// `total_pages` is never below 1, so an empty collection still has a
/// page 1. Pages past the end (and page 0) come back empty, not as errors.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: usize) -> Paginated<T> {
    let page_size = page_size.max(1);
    let count = items.len();
    let total_pages = u32::try_from(count.div_ceil(page_size).max(1)).unwrap_or(u32::MAX);

    let results = match (page as usize).checked_sub(1) {
        Some(index) => items
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .collect(),
        None => Vec::new(),
    };

    Paginated {
        count,
        page,
        total_pages,
        next_page: (page < total_pages).then(|| page + 1),
        previous_page: (page > 1).then(|| page - 1),
        results,
    }
}
