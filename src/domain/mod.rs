//! Domain layer for the Maktaba plugin.
//!
//! Core types and rules, independent of Zellij APIs and rendering:
//!
//! - [`catalog`]: sections, items, search hits, stats and the category filter
//! - [`content`]: payload classification (file reference vs plain text)
//! - [`error`]: error types and result alias
//!
//! # Examples
//!
//! ```
//! use maktaba::domain::{classify, filter_sections, ContentKind, FilterState};
//!
//! assert_eq!(classify("AgADBAAD"), ContentKind::File);
//! assert!(filter_sections(&[], &FilterState::All).is_empty());
//! ```

pub mod catalog;
pub mod content;
pub mod error;

pub use catalog::{filter_sections, FilterState, Id, Item, SearchResult, Section, SectionDetail, Stats};
pub use content::{classify, ContentKind, FILE_PREFIXES};
pub use error::{LoadError, MaktabaError, Result};
