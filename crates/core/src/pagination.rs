//! Pagination math shared by the listing endpoints.
//!
//! Both grids use fixed page sizes. A request for a page past the end of a
//! non-empty result set is a not-found condition, not an empty page; page 1
//! of an empty result set is a valid empty page.

/// Page size for the public plot grid.
pub const PUBLIC_PAGE_SIZE: i64 = 9;

/// Page size for the admin grids (plots, applications).
pub const ADMIN_PAGE_SIZE: i64 = 10;

/// Number of pages needed for `total_items` rows at `page_size` per page.
pub fn total_pages(total_items: i64, page_size: i64) -> i64 {
    if total_items <= 0 {
        0
    } else {
        (total_items + page_size - 1) / page_size
    }
}

/// Resolve a 1-based page number to a row offset.
///
/// Returns `None` when the page lies beyond the last page of a non-empty
/// result set. Page numbers below 1 are clamped to 1.
pub fn offset_for_page(page: i64, total_items: i64, page_size: i64) -> Option<i64> {
    let page = page.max(1);
    let pages = total_pages(total_items, page_size);
    if total_items > 0 && page > pages {
        return None;
    }
    Some((page - 1) * page_size)
}
