//! Stable facade for pagination helpers used by list views.

/// Default number of items requested per page.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

pub mod events;
mod page;
mod paginator;
mod window;

pub use events::{
    CHANGE_PAGE_EVENT, PageChangeReceiver, PageChangeRequest, PageChangeRouter, PageChangeSender,
    page_change_channel,
};
pub use page::{clamp_page, page_window, parse_one_based_page, total_pages};
pub use paginator::Paginator;
pub use window::{
    PageWindow, PaginationState, WINDOW_SIZE, WindowError, compute_window, window_for,
};
