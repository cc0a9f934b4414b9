//! Composable UI component renderers.
//!
//! Each component writes whole lines into a [`Frame`]:
//!
//! - [`header`]: title bar and animated counters
//! - [`filters`]: category chips
//! - [`search`]: search input box
//! - [`lists`]: section grid and search results panel
//! - [`modal`]: section and item overlays
//! - [`empty`]: loading, empty and failed states
//! - [`footer`]: keybinding hints

mod empty;
mod filters;
mod footer;
mod header;
mod lists;
mod modal;
mod search;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Writes a horizontal rule on `row`.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) {
    frame.set(row, format!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset()));
}

/// Renders a complete frame: page chrome, grid, results, then overlays bottom-up.
#[must_use]
pub fn render_frame(vm: &UIViewModel, theme: &Theme) -> Frame {
    let layout = &vm.layout;
    let mut frame = Frame::new(layout.rows);

    header::render_header(&mut frame, &vm.header, theme, layout.cols);
    filters::render_filter_bar(&mut frame, &vm.filter_bar, theme);
    search::render_search_bar(&mut frame, &vm.search_bar, theme, layout.cols);
    lists::render_grid(&mut frame, layout.grid, &vm.grid, theme);
    if let (Some(results), Some(rect)) = (&vm.results, layout.results) {
        lists::render_results(&mut frame, rect, results, theme);
    }
    footer::render_footer(&mut frame, layout.footer_row, &vm.footer, theme, layout.cols);

    if let Some(section) = &vm.section_modal {
        modal::render_section_modal(&mut frame, layout.section_modal, section, theme, layout.cols);
    }
    if let Some(item) = &vm.item_modal {
        modal::render_item_modal(&mut frame, layout.item_modal, item, theme, layout.cols);
    }

    frame
}
