//! Section grid and search results panel.

use super::empty::empty_state_line;
use crate::ui::helpers::{clamp_ranges, fit, render_highlighted_text, truncate, Frame};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, EmptyState, ListView, ResultRow, ResultsView};
use unicode_width::UnicodeWidthStr;

const SELECTED_MARKER: &str = "▶ ";
const UNSELECTED_MARKER: &str = "  ";

fn row_style(theme: &Theme, is_selected: bool) -> String {
    if is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn marker(is_selected: bool) -> &'static str {
    if is_selected {
        SELECTED_MARKER
    } else {
        UNSELECTED_MARKER
    }
}

/// Writes an empty state in the middle of `rect`, blanking the other rows.
fn render_empty_in(frame: &mut Frame, rect: Rect, empty: &EmptyState, theme: &Theme) {
    for row in rect.y..rect.y + rect.height {
        frame.set(row, String::new());
    }
    if rect.height > 0 {
        frame.set(rect.y + rect.height / 2, empty_state_line(empty, theme, rect.width));
    }
}

/// Renders one card per line inside `rect`.
pub fn render_grid(frame: &mut Frame, rect: Rect, grid: &ListView<CardItem>, theme: &Theme) {
    if let Some(empty) = &grid.empty_state {
        render_empty_in(frame, rect, empty, theme);
        return;
    }

    let text_width = rect.width.saturating_sub(SELECTED_MARKER.width());
    for (offset, card) in grid.rows.iter().enumerate().take(rect.height) {
        frame.set(
            rect.y + offset,
            format!(
                "{}{}{}{}",
                row_style(theme, card.is_selected),
                marker(card.is_selected),
                fit(&card.text, text_width),
                Theme::reset()
            ),
        );
    }
}

/// Renders the results panel: a title line, then one line per hit.
pub fn render_results(frame: &mut Frame, rect: Rect, results: &ResultsView, theme: &Theme) {
    if rect.height == 0 {
        return;
    }

    let title_style = if results.list.is_focused {
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg))
    } else {
        Theme::fg(&theme.colors.text_dim)
    };
    frame.set(
        rect.y,
        format!("{title_style}{}{}", fit(&format!(" {}", results.title), rect.width), Theme::reset()),
    );

    let body = Rect {
        y: rect.y + 1,
        height: rect.height - 1,
        ..rect
    };

    if let Some(empty) = &results.list.empty_state {
        render_empty_in(frame, body, empty, theme);
        return;
    }

    for (offset, row) in results.list.rows.iter().enumerate().take(body.height) {
        frame.set(body.y + offset, result_line(row, theme, body.width));
    }
}

fn result_line(row: &ResultRow, theme: &Theme, width: usize) -> String {
    let base = row_style(theme, row.is_selected);
    let tag = format!("[{}]", row.tag.tag());
    let meta_width = row.section_label.width() + tag.width() + 4;
    let title_width = width.saturating_sub(SELECTED_MARKER.width() + meta_width);

    let title = truncate(&row.title, title_width);
    let used = SELECTED_MARKER.width() + title.width() + meta_width;
    let highlighted = if row.is_selected {
        title
    } else if title == row.title {
        render_highlighted_text(&title, &row.highlight_ranges, theme, &base)
    } else {
        let kept = title.chars().count().saturating_sub(1);
        render_highlighted_text(&title, &clamp_ranges(&row.highlight_ranges, kept), theme, &base)
    };

    format!(
        "{base}{}{highlighted}  {}{}{base}  {}{tag}{base}{}{}",
        marker(row.is_selected),
        Theme::fg(&theme.colors.text_dim),
        row.section_label,
        theme.tag_fg(row.tag),
        " ".repeat(width.saturating_sub(used)),
        Theme::reset()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentKind;
    use crate::ui::helpers::strip_ansi;

    fn row(ranges: Vec<(usize, usize)>) -> ResultRow {
        ResultRow {
            title: "abcdefghijklmnopqrstuvwxyz".into(),
            highlight_ranges: ranges,
            section_label: "s".into(),
            tag: ContentKind::Text,
            is_selected: false,
        }
    }

    #[test]
    fn match_past_the_cut_is_not_highlighted() {
        let theme = Theme::default();
        let line = result_line(&row(vec![(24, 26)]), &theme, 30);

        assert!(strip_ansi(&line).contains('…'));
        assert!(!line.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn match_before_the_cut_is_highlighted() {
        let theme = Theme::default();
        let line = result_line(&row(vec![(0, 3)]), &theme, 30);

        assert!(line.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
        assert!(strip_ansi(&line).contains("abc"));
    }
}
