//! Header component: title, animated counters and the separator below them.

use crate::ui::helpers::{center, Frame};
use crate::ui::layout::{FILTER_ROW, STATS_ROW, TITLE_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar and counter line.
///
/// The counter line stays blank until stats arrive; a stats failure never
/// shows anything here.
pub fn render_header(frame: &mut Frame, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let mut title = String::new();
    title.push_str(Theme::bold());
    title.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        title.push_str(&Theme::bg(bg));
    }
    title.push_str(&center(&header.title, cols));
    title.push_str(Theme::reset());
    frame.set(TITLE_ROW, title);

    let counters = match (&header.counters, &header.updated) {
        (Some(counters), Some(updated)) => format!("{counters}  ·  🕒 {updated}"),
        (Some(counters), None) => counters.clone(),
        (None, _) => String::new(),
    };
    frame.set(
        STATS_ROW,
        format!("{}{}{}", Theme::fg(&theme.colors.counter_fg), center(&counters, cols), Theme::reset()),
    );

    super::render_border(frame, FILTER_ROW - 1, &theme.colors.border, cols);
}
