//! Pure pagination math shared by list views and the snapshot store.

/// Compute the number of pages for a paginated list.
///
/// An empty list still has one (empty) page so a window can be rendered.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Return start/end item indices for a page of `per_page` items.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = start.saturating_add(safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Parse a one-based page argument.
///
/// Returns `Some(1)` when no value was supplied, `Some(page)` when the value
/// is valid (`>= 1`), otherwise `None`.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value.trim().parse::<usize>().ok().filter(|page| *page >= 1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn page_window_bounds_last_page() {
        assert_eq!(page_window(45, 20, 1), (0, 20));
        assert_eq!(page_window(45, 20, 3), (40, 45));
        assert_eq!(page_window(45, 20, 9), (45, 45));
    }

    #[test]
    fn parse_page_argument() {
        assert_eq!(parse_one_based_page(None), Some(1));
        assert_eq!(parse_one_based_page(Some(" 4 ")), Some(4));
        assert_eq!(parse_one_based_page(Some("0")), None);
        assert_eq!(parse_one_based_page(Some("two")), None);
    }
}
