//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (`main.rs`) and the domain,
//! loader and UI layers. Data flows one way:
//!
//! ```text
//! Key/Mouse/Timer → Event → handle_event → state transitions → Actions → Zellij
//!                              ↑                                   │
//!                              └──── WebRequestResult → Loaded ◀───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`animator`]: Header counter animation
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modal`]: Section and item overlays
//! - [`modes`]: Input mode and focus anchors
//! - [`search`]: Search input and results panel
//! - [`state`]: Central state container and view model computation
//! - [`store`]: Section catalog and category filter
//! - [`surface`]: Generation-guarded load lifecycle shared by all surfaces
//!
//! # Example
//!
//! ```rust
//! use maktaba::app::{handle_event, AppState, Event, Settings};
//! use maktaba::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Settings::default());
//! let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod animator;
pub mod handler;
pub mod modal;
pub mod modes;
pub mod search;
pub mod state;
pub mod store;
pub mod surface;

pub use actions::Action;
pub use animator::StatsAnimator;
pub use handler::{handle_event, Event};
pub use modal::{ModalController, Overlay};
pub use modes::{Anchor, InputMode};
pub use search::{SearchController, Submission};
pub use state::{AppState, Settings, Viewport};
pub use store::{CatalogStatus, CatalogStore};
pub use surface::{Surface, SurfaceState};
