//! Maktaba: a Zellij plugin for browsing a remote content library.
//!
//! The plugin talks to a read-only content service over HTTP and offers:
//! - Animated header counters from the service's statistics
//! - A section grid filterable by category
//! - Full-text search with highlighted matches
//! - Stacked overlays for a section's items and a single item's content
//! - File payloads replaced by a link to the companion bot, never shown raw

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action dispatching               │
//! │  - Catalog store, overlays, search, animator        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                      │
//! ┌───────────────────────┐      ┌───────────────────────┐
//! │ UI Layer (ui/)        │      │ Loader (loader/)      │
//! │ - Layout, hit-testing │      │ - Endpoint requests   │
//! │ - Theming, components │      │ - Response decoding   │
//! └───────────────────────┘      └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and Infrastructure                │
//! │  - Catalog types, content classification, errors    │
//! │  - Sandbox paths                                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/maktaba.wasm" {
//!         api_url "http://127.0.0.1:5000"
//!         theme "catppuccin-mocha"
//!         file_link "https://t.me/my_library_bot"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use maktaba::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Startup)?;
//! assert_eq!(actions.len(), 2);
//! assert!(actions.iter().all(|action| matches!(action, Action::Fetch { .. })));
//! # Ok::<(), maktaba::MaktabaError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod loader;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Settings};
pub use domain::{MaktabaError, Result};
pub use ui::Theme;

use app::state::DEFAULT_FILE_LINK;
use std::collections::BTreeMap;

/// Content service used when `api_url` is not configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Command used to open the file link when `link_opener` is not configured.
pub const DEFAULT_LINK_OPENER: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the content service.
    pub api_url: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` refers to the host directory.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans and events. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where file items point the reader.
    pub file_link: String,

    /// Host command that opens `file_link`.
    pub link_opener: String,

    /// Header counter animation length.
    pub counter_duration_ms: u64,

    /// Number of counter animation frames.
    pub counter_steps: u32,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            file_link: DEFAULT_FILE_LINK.to_string(),
            link_opener: DEFAULT_LINK_OPENER.to_string(),
            counter_duration_ms: settings.counter_duration_ms,
            counter_steps: settings.counter_steps,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing, blank or unparsable values fall back to their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use maktaba::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "https://library.example/".to_string());
    /// map.insert("counter_steps".to_string(), "many".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_url, "https://library.example/");
    /// assert_eq!(config.counter_steps, 60);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            api_url: text("api_url")
                .map(|url| {
                    parse_api_url(&url).unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "invalid api_url, using default");
                        defaults.api_url.clone()
                    })
                })
                .unwrap_or_else(|| defaults.api_url.clone()),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
            file_link: text("file_link").unwrap_or(defaults.file_link),
            link_opener: text("link_opener").unwrap_or(defaults.link_opener),
            counter_duration_ms: text("counter_duration_ms")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.counter_duration_ms),
            counter_steps: text("counter_steps")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.counter_steps),
        }
    }

    /// Application settings derived from this configuration.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            counter_duration_ms: self.counter_duration_ms,
            counter_steps: self.counter_steps,
            file_link: self.file_link.clone(),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Validates a content service base URL.
///
/// # Errors
///
/// Returns [`MaktabaError::Config`] unless the URL uses `http` or `https`
/// and names a host.
pub fn parse_api_url(url: &str) -> Result<String> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| MaktabaError::Config(format!("api_url must start with http:// or https://, got {url:?}")))?;

    if rest.trim_start_matches('/').is_empty() {
        return Err(MaktabaError::Config(format!("api_url has no host: {url:?}")));
    }
    Ok(url.to_string())
}

/// Creates the initial application state for `config`.
///
/// Nothing is fetched here; the plugin sends [`Event::Startup`] once web
/// access has been granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing maktaba plugin");
    AppState::new(config.theme(), config.settings())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("theme", "catppuccin-latte"),
            ("file_link", "https://t.me/library_bot"),
            ("link_opener", "open"),
            ("counter_duration_ms", "500"),
            ("counter_steps", "10"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.link_opener, "open");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));

        let settings = config.settings();
        assert_eq!(settings.counter_duration_ms, 500);
        assert_eq!(settings.counter_steps, 10);
        assert_eq!(settings.file_link, "https://t.me/library_bot");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[("api_url", "  "), ("theme", "")]));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn malformed_api_url_falls_back() {
        let config = Config::from_zellij(&map(&[("api_url", "library.example")]));
        assert_eq!(config.api_url, DEFAULT_API_URL);

        assert!(matches!(parse_api_url("https://"), Err(MaktabaError::Config(_))));
        assert_eq!(parse_api_url("http://10.0.0.2:8080").unwrap(), "http://10.0.0.2:8080");
    }

    #[test]
    fn theme_resolution_falls_back_to_default() {
        let mut config = Config {
            theme_name: Some("catppuccin-latte".into()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "catppuccin-latte");

        config.theme_file = Some("/definitely/missing.toml".into());
        assert_eq!(config.theme().name, "catppuccin-mocha");

        config.theme_file = None;
        config.theme_name = Some("unknown".into());
        assert_eq!(config.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_applies_settings() {
        let config = Config {
            file_link: "https://t.me/x".into(),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.settings.file_link, "https://t.me/x");
    }
}
