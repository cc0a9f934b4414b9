//! Filter bar component.

use crate::ui::helpers::Frame;
use crate::ui::layout::{filter_chip, FILTER_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the category chips, active one highlighted.
///
/// Chip positions must stay in step with [`crate::ui::layout::filter_spans`],
/// which mouse hit-testing uses.
pub fn render_filter_bar(frame: &mut Frame, bar: &FilterBarInfo, theme: &Theme) {
    let mut line = String::from(" ");

    for label in &bar.labels {
        if label.is_active {
            line.push_str(Theme::bold());
            line.push_str(&Theme::fg(&theme.colors.filter_active_fg));
            line.push_str(&Theme::bg(&theme.colors.filter_active_bg));
        } else {
            line.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        line.push_str(&filter_chip(&label.text));
        line.push_str(Theme::reset());
        line.push(' ');
    }

    frame.set(FILTER_ROW, line);
}
