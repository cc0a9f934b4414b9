//! Empty state component renderer.

use crate::ui::helpers::center;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{EmptyKind, EmptyState};

/// Styled, centered single line for an empty state.
///
/// Failures use the error color so they never read like an empty success.
#[must_use]
pub fn empty_state_line(empty: &EmptyState, theme: &Theme, width: usize) -> String {
    let color = match empty.kind {
        EmptyKind::Failed => &theme.colors.error_fg,
        EmptyKind::Loading | EmptyKind::Empty => &theme.colors.empty_state_fg,
    };
    format!("{}{}{}", Theme::fg(color), center(&empty.line(), width), Theme::reset())
}
