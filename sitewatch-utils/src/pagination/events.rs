//! Page-change requests and suffix-based routing to list listeners.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Base name of the page-change event; a paginator appends its suffix.
pub const CHANGE_PAGE_EVENT: &str = "change-page";

/// Request from a paginator asking its owning list to reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChangeRequest {
    /// Target page, 1-based.
    pub page: usize,
    /// Page size to load.
    pub limit: usize,
    /// Discriminator of the paginator that emitted the request.
    pub suffix: String,
}

impl PageChangeRequest {
    /// Full event name, e.g. `change-page-timeline`.
    pub fn event_name(&self) -> String {
        event_name(&self.suffix)
    }
}

/// Build the event name for a paginator suffix.
pub fn event_name(suffix: &str) -> String {
    format!("{CHANGE_PAGE_EVENT}{suffix}")
}

pub type PageChangeSender = mpsc::UnboundedSender<PageChangeRequest>;
pub type PageChangeReceiver = mpsc::UnboundedReceiver<PageChangeRequest>;

/// Create the channel a view hands to its paginators.
pub fn page_change_channel() -> (PageChangeSender, PageChangeReceiver) {
    mpsc::unbounded_channel()
}

/// Maps paginator suffixes to the listener that owns each list.
///
/// Exact-match only: a listener registered for `""` never sees requests
/// tagged `-timeline`.
#[derive(Debug, Clone)]
pub struct PageChangeRouter<L> {
    routes: Vec<(String, L)>,
}

impl<L: Copy> PageChangeRouter<L> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register `listener` for requests tagged with `suffix`.
    ///
    /// Re-registering a suffix replaces its listener.
    pub fn listen(mut self, suffix: impl Into<String>, listener: L) -> Self {
        let suffix = suffix.into();
        self.routes.retain(|(existing, _)| *existing != suffix);
        self.routes.push((suffix, listener));
        self
    }

    /// Find the listener owning a request, if any.
    pub fn route(&self, request: &PageChangeRequest) -> Option<L> {
        self.routes
            .iter()
            .find_map(|(suffix, listener)| (*suffix == request.suffix).then_some(*listener))
    }
}

impl<L: Copy> Default for PageChangeRouter<L> {
    fn default() -> Self {
        Self::new()
    }
}
