//! Bounded-width page window computation.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::page::clamp_page;

/// Maximum number of page controls rendered at once.
pub const WINDOW_SIZE: usize = 11;

/// Current page and total page count of a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Current page, 1-based.
    pub page: usize,
    /// Total page count.
    pub max: usize,
}

impl PaginationState {
    pub fn new(page: usize, max: usize) -> Self {
        Self { page, max }
    }

    /// Whether `page` is a selectable page for this state.
    pub fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.max
    }
}

/// Contiguous, ascending run of page numbers to render as controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    end: usize,
}

impl PageWindow {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A computed window always holds at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, page: usize) -> bool {
        self.range().contains(&page)
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.range()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl IntoIterator for &PageWindow {
    type Item = usize;
    type IntoIter = RangeInclusive<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.range()
    }
}

/// Input-contract violations when computing a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// The list reported zero pages.
    EmptyRange,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange => f.write_str("pagination max must be at least 1"),
        }
    }
}

impl std::error::Error for WindowError {}

/// Compute the page numbers to display around `page`.
///
/// The window is centered on `page` and holds up to [`WINDOW_SIZE`] pages.
/// Near either boundary the opposite edge is shifted so the width stays
/// constant whenever `max` allows it. A `page` outside `[1, max]` is clamped
/// into range first.
pub fn compute_window(page: usize, max: usize) -> Result<PageWindow, WindowError> {
    if max < 1 {
        return Err(WindowError::EmptyRange);
    }

    let page = clamp_page(page, max);
    let half = WINDOW_SIZE / 2;

    // Unsigned throughout: `page - half` only runs once `page > half`.
    let (start, end) = if page <= half {
        (1, max.min(WINDOW_SIZE))
    } else if max - page < half {
        let overflow = half - (max - page);
        ((page - half).saturating_sub(overflow).max(1), max)
    } else {
        (page - half, page + half)
    };

    Ok(PageWindow { start, end })
}

/// Compute the window for a pagination state.
pub fn window_for(state: PaginationState) -> Result<PageWindow, WindowError> {
    compute_window(state.page, state.max)
}
