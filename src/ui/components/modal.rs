//! Overlay components: the section overlay and the item overlay.
//!
//! An overlay replaces every pane line it spans. The part of those lines
//! outside the box is the backdrop; clicking it dismisses the overlay.

use super::empty::empty_state_line;
use crate::ui::helpers::{center, fit, Frame};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ItemBody, ItemModalView, SectionModalView, FILE_HINT, FILE_LINK_LABEL, FILE_NOTICE, LOADING};
use unicode_width::UnicodeWidthStr;

/// Draws the box, its title, and blank content rows.
fn render_frame(frame: &mut Frame, rect: Rect, title: &str, theme: &Theme, cols: usize) {
    let border = Theme::fg(&theme.colors.modal_border);
    let reset = Theme::reset();
    let inner = rect.width.saturating_sub(2);

    let backdrop = |segment: String| {
        format!(
            "{}{segment}{}",
            " ".repeat(rect.x),
            " ".repeat(cols.saturating_sub(rect.x + rect.width))
        )
    };

    frame.set(rect.y, backdrop(format!("{border}┌{}┐{reset}", "─".repeat(inner))));
    frame.set(
        rect.y + 1,
        backdrop(format!(
            "{border}│{reset} {}{}{}{reset} {border}│{reset}",
            Theme::bold(),
            Theme::fg(&theme.colors.header_fg),
            fit(title, rect.content_width())
        )),
    );
    frame.set(rect.y + 2, backdrop(format!("{border}├{}┤{reset}", "─".repeat(inner))));
    for row in rect.content_top()..rect.content_top() + rect.content_height() {
        frame.set(row, content_line(rect, "", "", theme, cols));
    }
    if rect.height >= 4 {
        frame.set(rect.y + rect.height - 1, backdrop(format!("{border}└{}┘{reset}", "─".repeat(inner))));
    }
}

/// One content line of an overlay. `text` is plain and gets fitted; `style`
/// is applied to it.
fn content_line(rect: Rect, style: &str, text: &str, theme: &Theme, cols: usize) -> String {
    let border = Theme::fg(&theme.colors.modal_border);
    let reset = Theme::reset();
    format!(
        "{}{border}│{reset} {style}{}{reset} {border}│{reset}{}",
        " ".repeat(rect.x),
        fit(text, rect.content_width()),
        " ".repeat(cols.saturating_sub(rect.x + rect.width))
    )
}

/// Like [`content_line`] for text that is already styled and fitted.
fn styled_content_line(rect: Rect, styled: &str, theme: &Theme, cols: usize) -> String {
    let border = Theme::fg(&theme.colors.modal_border);
    let reset = Theme::reset();
    format!(
        "{}{border}│{reset} {styled}{reset} {border}│{reset}{}",
        " ".repeat(rect.x),
        " ".repeat(cols.saturating_sub(rect.x + rect.width))
    )
}

pub fn render_section_modal(frame: &mut Frame, rect: Rect, view: &SectionModalView, theme: &Theme, cols: usize) {
    render_frame(frame, rect, &view.header, theme, cols);
    let height = rect.content_height();
    if height == 0 {
        return;
    }

    if let Some(empty) = &view.list.empty_state {
        let line = empty_state_line(empty, theme, rect.content_width());
        frame.set(rect.content_top() + height / 2, styled_content_line(rect, &line, theme, cols));
        return;
    }

    for (offset, row) in view.list.rows.iter().enumerate().take(height) {
        let tag = format!(" [{}]", row.tag.tag());
        let title_width = rect.content_width().saturating_sub(tag.width() + 2);
        let (style, marker) = if row.is_selected {
            (
                format!(
                    "{}{}",
                    Theme::fg(&theme.colors.selection_fg),
                    Theme::bg(&theme.colors.selection_bg)
                ),
                "▶ ",
            )
        } else {
            (Theme::fg(&theme.colors.text_normal), "  ")
        };
        let styled = format!("{style}{marker}{}{}{tag}", fit(&row.title, title_width), theme.tag_fg(row.tag));
        frame.set(rect.content_top() + offset, styled_content_line(rect, &styled, theme, cols));
    }
}

pub fn render_item_modal(frame: &mut Frame, rect: Rect, view: &ItemModalView, theme: &Theme, cols: usize) {
    render_frame(frame, rect, &view.title, theme, cols);
    let height = rect.content_height();
    let width = rect.content_width();
    if height == 0 {
        return;
    }
    let top = rect.content_top();

    match &view.body {
        ItemBody::Loading => {
            let style = Theme::fg(&theme.colors.empty_state_fg);
            frame.set(top + height / 2, content_line(rect, &style, &center(LOADING, width), theme, cols));
        }
        ItemBody::Failed(empty) => {
            let line = empty_state_line(empty, theme, width);
            frame.set(top + height / 2, styled_content_line(rect, &line, theme, cols));
        }
        ItemBody::Text { lines, has_more } => {
            let style = Theme::fg(&theme.colors.text_normal);
            for (offset, line) in lines.iter().enumerate().take(height) {
                frame.set(top + offset, content_line(rect, &style, line, theme, cols));
            }
            if *has_more {
                let style = Theme::fg(&theme.colors.text_dim);
                frame.set(top + height - 1, content_line(rect, &style, &center("▼", width), theme, cols));
            }
        }
        ItemBody::File { link } => {
            let lines = [
                (Theme::fg(&theme.colors.text_dim), FILE_NOTICE.to_string()),
                (String::new(), String::new()),
                (Theme::fg(&theme.colors.text_dim), FILE_HINT.to_string()),
                (String::new(), String::new()),
                (format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.link_fg)), FILE_LINK_LABEL.to_string()),
                (Theme::fg(&theme.colors.link_fg), link.clone()),
            ];
            for (offset, (style, text)) in lines.iter().enumerate().take(height) {
                frame.set(top + offset, content_line(rect, style, &center(text, width), theme, cols));
            }
        }
    }
}
