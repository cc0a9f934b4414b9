//! Filesystem conventions of the Zellij plugin sandbox.
//!
//! Inside the sandbox `/data` is the plugin's private data directory and
//! `/host` is the host directory Zellij was started from.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
