//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → Frame → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types and fixed UI texts
//! - [`layout`]: frame geometry shared with mouse hit-testing
//! - [`renderer`]: top-level rendering entry points
//! - [`components`]: per-region renderers
//! - [`helpers`]: frame buffer, sanitizing, width-aware text utilities
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use helpers::Frame;
pub use layout::{Layout, Rect};
pub use renderer::{render, render_to_frame};
pub use theme::Theme;
pub use viewmodel::UIViewModel;
