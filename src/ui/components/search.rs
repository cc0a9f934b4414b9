//! Search bar component renderer.

use crate::ui::helpers::{fit, Frame};
use crate::ui::layout::{SEARCH_HEIGHT, SEARCH_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Renders the 3-line search box and the separator below it.
///
/// ```text
/// ┌──────────────────────┐
/// │ 🔍 query▏            │
/// └──────────────────────┘
/// ```
pub fn render_search_bar(frame: &mut Frame, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let border = if search.is_typing {
        Theme::fg(&theme.colors.search_bar_border)
    } else {
        Theme::fg(&theme.colors.border)
    };
    let inner = cols.saturating_sub(2);
    let reset = Theme::reset();

    frame.set(SEARCH_ROW, format!("{border}┌{}┐{reset}", "─".repeat(inner)));

    let text = if search.query.is_empty() && !search.is_typing {
        " 🔍 ابحث عن محتوى... (/)".to_string()
    } else if search.is_typing {
        format!(" 🔍 {}▏", search.query)
    } else {
        format!(" 🔍 {}", search.query)
    };
    let text_color = if search.query.is_empty() && !search.is_typing {
        Theme::fg(&theme.colors.text_dim)
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    frame.set(
        SEARCH_ROW + 1,
        format!("{border}│{reset}{text_color}{}{reset}{border}│{reset}", fit(&text, inner)),
    );

    frame.set(SEARCH_ROW + 2, format!("{border}└{}┘{reset}", "─".repeat(inner)));

    super::render_border(frame, SEARCH_ROW + SEARCH_HEIGHT, &theme.colors.border, cols);
}
