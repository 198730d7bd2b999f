//! Paginator component: caches the page window and emits page changes.

use tracing::debug;

use super::events::{PageChangeRequest, PageChangeSender, event_name};
use super::window::{PageWindow, PaginationState, WindowError, window_for};

/// One pagination control bound to a single list.
///
/// The owning view pushes every new [`PaginationState`] through
/// [`Paginator::update`]; page clicks go out through the channel supplied at
/// construction, tagged with this paginator's suffix.
#[derive(Debug, Clone)]
pub struct Paginator {
    suffix: String,
    sender: PageChangeSender,
    state: Option<PaginationState>,
    window: Option<PageWindow>,
}

impl Paginator {
    /// Paginator for a view with a single list (empty suffix).
    pub fn new(sender: PageChangeSender) -> Self {
        Self::with_suffix(sender, "")
    }

    /// Paginator for one of several independent lists in a view.
    pub fn with_suffix(sender: PageChangeSender, suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            sender,
            state: None,
            window: None,
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn event_name(&self) -> String {
        event_name(&self.suffix)
    }

    pub fn state(&self) -> Option<PaginationState> {
        self.state
    }

    /// Last computed window, if a state has been pushed.
    pub fn window(&self) -> Option<&PageWindow> {
        self.window.as_ref()
    }

    /// Push a new pagination state.
    ///
    /// The window is recomputed only when the state value differs from the
    /// previous one. Returns whether a recompute happened.
    pub fn update(&mut self, state: PaginationState) -> Result<bool, WindowError> {
        if self.state == Some(state) {
            return Ok(false);
        }

        let window = window_for(state)?;
        self.state = Some(state);
        self.window = Some(window);
        Ok(true)
    }

    /// Request the owning list to load `target` with `limit` items per page.
    ///
    /// Out-of-range targets are dropped silently; the rendered window never
    /// offers them. Returns whether a request was emitted.
    pub fn change_page(&self, target: usize, limit: usize) -> bool {
        let Some(state) = self.state else {
            debug!(page = target, suffix = %self.suffix, "page change before first state, dropped");
            return false;
        };

        if !state.contains(target) {
            debug!(page = target, max = state.max, suffix = %self.suffix, "page change out of range, dropped");
            return false;
        }

        let request = PageChangeRequest {
            page: target,
            limit,
            suffix: self.suffix.clone(),
        };

        if self.sender.send(request).is_err() {
            debug!(suffix = %self.suffix, "page change listener gone");
            return false;
        }

        true
    }

    /// Request the page before the current one.
    pub fn previous(&self, limit: usize) -> bool {
        match self.state {
            Some(state) => self.change_page(state.page.saturating_sub(1), limit),
            None => false,
        }
    }

    /// Request the page after the current one.
    pub fn next(&self, limit: usize) -> bool {
        match self.state {
            Some(state) => self.change_page(state.page.saturating_add(1), limit),
            None => false,
        }
    }
}
