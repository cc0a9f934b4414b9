//! Footer component renderer.

use crate::ui::helpers::{center, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered on `row`, with a separator above.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) {
    if let Some(border_row) = row.checked_sub(1) {
        super::render_border(frame, border_row, &theme.colors.border, cols);
    }

    frame.set(
        row,
        format!(
            "{}{}{}",
            Theme::fg(&theme.colors.text_dim),
            center(&footer.keybindings, cols),
            Theme::reset()
        ),
    );
}
