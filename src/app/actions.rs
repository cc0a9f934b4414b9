//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a `Vec<Action>`
//! and the shim in `main.rs` executes them in order: web requests, timers,
//! external commands, and hiding the pane.
//!
//! # Example
//!
//! ```rust
//! use maktaba::app::Action;
//! use maktaba::loader::ApiRequest;
//!
//! let actions = vec![
//!     Action::Fetch { request: ApiRequest::Stats, generation: 1 },
//!     Action::Fetch { request: ApiRequest::Sections, generation: 1 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::loader::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (pressing 'q'
    /// with no overlay open).
    CloseFocus,

    /// Issues a GET request to the content service.
    ///
    /// The shim attaches the serialized request context so the response can be
    /// matched back to the surface that asked for it.
    Fetch {
        /// Endpoint and subject.
        request: ApiRequest,
        /// Generation token of the requesting surface.
        generation: u64,
    },

    /// Schedules the next counter animation tick.
    ScheduleTick {
        /// Delay before the `Timer` event fires.
        seconds: f64,
    },

    /// Opens an external link with the configured opener command.
    OpenLink {
        /// Target URL.
        url: String,
    },
}
