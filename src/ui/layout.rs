//! Frame geometry shared by the renderer and mouse hit-testing.
//!
//! Coordinates are zero-based pane lines and columns, the same space Zellij
//! reports mouse clicks in.
//!
//! ```text
//! 0   title
//! 1   stats counters
//! 2   ────────────
//! 3   filter bar
//! 4-6 search box
//! 7   ────────────
//! 8.. section grid        (top half when the results panel is visible)
//!     results panel       (bottom half)
//! n-2 ────────────
//! n-1 footer
//! ```
//!
//! Overlays are centered boxes drawn over everything else.

use unicode_width::UnicodeWidthStr;

pub const TITLE_ROW: usize = 0;
pub const STATS_ROW: usize = 1;
pub const FILTER_ROW: usize = 3;
pub const SEARCH_ROW: usize = 4;
pub const SEARCH_HEIGHT: usize = 3;
pub const BODY_TOP: usize = 8;

/// Rows an overlay spends on its frame, title and separator.
pub const MODAL_CHROME: usize = 4;

/// A rectangular region of the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, line: usize, col: usize) -> bool {
        line >= self.y && line < self.y + self.height && col >= self.x && col < self.x + self.width
    }

    /// Centered rect taking `percent` of each dimension, never smaller than the
    /// minimum an overlay needs to show one row.
    #[must_use]
    pub fn centered(rows: usize, cols: usize, percent: usize) -> Self {
        let width = (cols * percent / 100).max(12).min(cols);
        let height = (rows * percent / 100).max(MODAL_CHROME + 1).min(rows);
        Self {
            x: (cols - width) / 2,
            y: (rows - height) / 2,
            width,
            height,
        }
    }

    /// First line of an overlay's content area.
    #[must_use]
    pub const fn content_top(&self) -> usize {
        self.y + 3
    }

    /// Lines available for overlay content.
    #[must_use]
    pub const fn content_height(&self) -> usize {
        self.height.saturating_sub(MODAL_CHROME)
    }

    /// Columns available for overlay content (frame plus one space each side).
    #[must_use]
    pub const fn content_width(&self) -> usize {
        self.width.saturating_sub(4)
    }
}

/// Regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    /// Card rows of the section grid.
    pub grid: Rect,
    /// Results panel; its first line is the panel title.
    pub results: Option<Rect>,
    pub footer_row: usize,
    pub section_modal: Rect,
    pub item_modal: Rect,
}

impl Layout {
    #[must_use]
    pub fn compute(rows: usize, cols: usize, results_visible: bool) -> Self {
        let body_bottom = rows.saturating_sub(2).max(BODY_TOP);
        let body_height = body_bottom - BODY_TOP;

        let (grid_height, results) = if results_visible {
            let grid_height = body_height / 2;
            let results = Rect {
                x: 0,
                y: BODY_TOP + grid_height,
                width: cols,
                height: body_height - grid_height,
            };
            (grid_height, Some(results))
        } else {
            (body_height, None)
        };

        Self {
            rows,
            cols,
            grid: Rect {
                x: 0,
                y: BODY_TOP,
                width: cols,
                height: grid_height,
            },
            results,
            footer_row: rows.saturating_sub(1),
            section_modal: Rect::centered(rows, cols, 80),
            item_modal: Rect::centered(rows, cols, 70),
        }
    }

    /// Rows of the results panel available for result lines.
    #[must_use]
    pub fn results_rows(&self) -> usize {
        self.results.map_or(0, |r| r.height.saturating_sub(1))
    }

    #[must_use]
    pub const fn search_box(&self) -> Rect {
        Rect {
            x: 0,
            y: SEARCH_ROW,
            width: self.cols,
            height: SEARCH_HEIGHT,
        }
    }
}

/// Renders a filter label as it appears in the filter bar.
#[must_use]
pub fn filter_chip(label: &str) -> String {
    format!(" {label} ")
}

/// Column spans `(start, end)` of each filter chip, end exclusive.
#[must_use]
pub fn filter_spans<S: AsRef<str>>(labels: &[S]) -> Vec<(usize, usize)> {
    let mut col = 1;
    labels
        .iter()
        .map(|label| {
            let width = filter_chip(label.as_ref()).width();
            let span = (col, col + width);
            col += width + 1;
            span
        })
        .collect()
}

/// First index of a window of `height` rows over `len` entries that keeps
/// `selected` visible, roughly centered.
#[must_use]
pub fn visible_window(selected: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let start = selected.saturating_sub(height / 2);
    start.min(len - height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_fills_space_between_chrome() {
        let layout = Layout::compute(24, 80, false);
        assert_eq!(layout.grid.y, BODY_TOP);
        assert_eq!(layout.grid.height, 14);
        assert_eq!(layout.footer_row, 23);
        assert!(layout.results.is_none());
    }

    #[test]
    fn results_take_the_bottom_half() {
        let layout = Layout::compute(24, 80, true);
        let results = layout.results.unwrap();
        assert_eq!(layout.grid.height, 7);
        assert_eq!(results.y, 15);
        assert_eq!(results.height, 7);
        assert_eq!(layout.results_rows(), 6);
    }

    #[test]
    fn tiny_panes_do_not_underflow() {
        let layout = Layout::compute(3, 5, true);
        assert_eq!(layout.grid.height, 0);
        assert!(layout.item_modal.width <= 5);
    }

    #[test]
    fn modals_are_centered_and_stacked_inside_each_other() {
        let layout = Layout::compute(40, 100, false);
        assert_eq!(layout.section_modal, Rect { x: 10, y: 4, width: 80, height: 32 });
        assert_eq!(layout.item_modal, Rect { x: 15, y: 6, width: 70, height: 28 });
        assert!(layout.section_modal.contains(20, 50));
        assert!(!layout.section_modal.contains(2, 50));
    }

    #[test]
    fn filter_spans_account_for_wide_text() {
        let spans = filter_spans(&["all", "تعليم"]);
        assert_eq!(spans[0], (1, 6));
        assert_eq!(spans[1].0, 7);
    }

    #[test]
    fn window_keeps_selection_visible() {
        assert_eq!(visible_window(0, 3, 10), 0);
        assert_eq!(visible_window(9, 20, 5), 7);
        assert_eq!(visible_window(19, 20, 5), 15);
        for selected in 0..50 {
            let start = visible_window(selected, 50, 7);
            assert!(selected >= start && selected < start + 7);
        }
    }
}
