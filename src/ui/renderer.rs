//! Top-level rendering coordinator.
//!
//! Rendering is split in two so the whole pipeline can be exercised without a
//! terminal:
//!
//! 1. [`render_to_frame`]: `AppState` → `UIViewModel` → [`Frame`] (pure)
//! 2. [`render`]: prints the frame to stdout for Zellij
//!
//! # Example
//!
//! ```rust
//! use maktaba::app::{AppState, Settings};
//! use maktaba::ui::{render_to_frame, Theme};
//!
//! let state = AppState::new(Theme::default(), Settings::default());
//! let frame = render_to_frame(&state, 24, 80);
//! assert!(frame.plain_text().contains("جاري التحميل..."));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Builds the frame for a pane of `rows` × `cols` cells.
#[must_use]
pub fn render_to_frame(state: &AppState, rows: usize, cols: usize) -> Frame {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, &state.theme)
}

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_frame(state, rows, cols).to_ansi());
}
