//! Custom Test Assertions
//!
//! Assertion helpers for claim pages with more useful failure messages than
//! plain `assert!`.

use domain_claims::{Claim, ClaimPage, SortSpec};

/// Asserts that consecutive rows are in `sort` order
///
/// # Panics
///
/// Panics naming the first pair of rows out of order.
pub fn assert_sorted_by(rows: &[Claim], sort: &SortSpec) {
    for pair in rows.windows(2) {
        assert!(
            sort.compare(&pair[0], &pair[1]).is_le(),
            "Rows out of order for {} {}: {} before {}",
            sort.field,
            sort.direction.as_str(),
            pair[0].id,
            pair[1].id
        );
    }
}

/// Asserts the page holds exactly these claim ids, in order
pub fn assert_page_ids(page: &ClaimPage, expected: &[&str]) {
    let actual: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(actual, expected, "Unexpected rows on page {}", page.page);
}

/// Asserts the page size and page count are consistent with the match count
pub fn assert_page_consistent(page: &ClaimPage) {
    let expected_pages = if page.page_size == 0 {
        0
    } else {
        page.total_items.div_ceil(page.page_size)
    };
    assert_eq!(
        page.total_pages, expected_pages,
        "total_pages {} does not match {} items at {} per page",
        page.total_pages, page.total_items, page.page_size
    );
    assert!(
        page.items.len() <= page.page_size,
        "Page holds {} rows, more than page size {}",
        page.items.len(),
        page.page_size
    );
}
