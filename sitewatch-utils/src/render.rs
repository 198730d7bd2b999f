//! Plain-text rendering of pagination controls and list bodies.

use crate::pagination::{PageWindow, PaginationState};

const PREV_LABEL: &str = "‹";
const NEXT_LABEL: &str = "›";

/// Render the clickable page controls for a window.
///
/// The current page is bracketed; previous/next markers only appear when
/// the neighbouring page exists. A single-page list renders nothing.
pub fn render_controls(state: PaginationState, window: &PageWindow) -> String {
    if state.max <= 1 {
        return String::new();
    }

    let mut parts = Vec::with_capacity(window.len() + 2);
    if state.page > 1 {
        parts.push(PREV_LABEL.to_owned());
    }

    for page in window {
        if page == state.page {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }

    if state.page < state.max {
        parts.push(NEXT_LABEL.to_owned());
    }

    parts.join(" ")
}

/// Build a `Page p/max` footer with an optional note.
pub fn render_footer(state: PaginationState, note: Option<&str>) -> String {
    let page = state.page.max(1);
    let max = state.max.max(1);

    if max > 1 {
        match note {
            Some(note) if !note.is_empty() => format!("Page {page}/{max} • {note}"),
            _ => format!("Page {page}/{max}"),
        }
    } else {
        match note {
            Some(note) if !note.is_empty() => note.to_owned(),
            _ => String::new(),
        }
    }
}

/// Render lines as a bullet list, or a placeholder when empty.
pub fn render_bullets(lines: &[String], empty: &str) -> String {
    if lines.is_empty() {
        return empty.to_owned();
    }
    format!("- {}", lines.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::compute_window;

    #[test]
    fn controls_bracket_current_page() {
        let state = PaginationState::new(3, 4);
        let window = compute_window(3, 4).unwrap();
        assert_eq!(render_controls(state, &window), "‹ 1 2 [3] 4 ›");
    }

    #[test]
    fn controls_hide_missing_neighbours() {
        let state = PaginationState::new(1, 2);
        let window = compute_window(1, 2).unwrap();
        assert_eq!(render_controls(state, &window), "[1] 2 ›");

        let single = PaginationState::new(1, 1);
        let window = compute_window(1, 1).unwrap();
        assert_eq!(render_controls(single, &window), "");
    }

    #[test]
    fn footer_variants() {
        assert_eq!(render_footer(PaginationState::new(2, 5), None), "Page 2/5");
        assert_eq!(
            render_footer(PaginationState::new(2, 5), Some("20 per page")),
            "Page 2/5 • 20 per page"
        );
        assert_eq!(render_footer(PaginationState::new(1, 1), Some("")), "");
    }

    #[test]
    fn bullets() {
        assert_eq!(render_bullets(&[], "Nothing yet."), "Nothing yet.");
        let lines = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(render_bullets(&lines, ""), "- a\n- b");
    }
}
