//! Input mode and focus anchor types.
//!
//! The plugin is either browsing (keys navigate and trigger commands) or typing
//! into the search input (keys edit the query). Independently, keyboard focus
//! sits on one of two anchors: the section grid or the search results panel.
//!
//! # Example
//!
//! ```rust
//! use maktaba::app::{Anchor, InputMode};
//!
//! let mode = InputMode::Typing;
//! assert_eq!(Anchor::Sections.next(), Anchor::Results);
//! # let _ = mode;
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys navigate the focused anchor or the topmost overlay.
    ///
    /// j/k move, Enter opens, h/l cycle the filter, / edits the search,
    /// Tab switches anchors, r reloads, q quits.
    #[default]
    Browse,

    /// Keys edit the search query; Enter submits, Esc returns to browsing.
    Typing,
}

/// In-page anchors that keyboard focus can jump between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// The section grid.
    #[default]
    Sections,
    /// The search results panel.
    Results,
}

impl Anchor {
    /// The other anchor.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Sections => Self::Results,
            Self::Results => Self::Sections,
        }
    }
}
