//! Error types for the Maktaba plugin.
//!
//! Two error families live here:
//!
//! - [`MaktabaError`]: crate-level failures (configuration, themes, I/O) with a
//!   [`Result`] alias used throughout the plugin.
//! - [`LoadError`]: the single "load failed" signal produced by the data loader.
//!   Callers only ever ask whether a load failed; the variant is kept for logs.

use thiserror::Error;

/// The main error type for Maktaba plugin operations.
///
/// # Examples
///
/// ```
/// use maktaba::MaktabaError;
///
/// fn validate_url(url: &str) -> Result<(), MaktabaError> {
///     if url.is_empty() {
///         return Err(MaktabaError::Config("api_url must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_url("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum MaktabaError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Uniform failure signal for every remote read.
///
/// The presentation layer never distinguishes between variants: any `LoadError`
/// turns into the load-failed empty state of the surface that asked for the data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The content service answered with a non-success status code.
    ///
    /// The host also reports transport failures (DNS, refused connection) this
    /// way, with the failure text as the body.
    #[error("content service returned status {status}: {detail}")]
    Status {
        /// HTTP status code reported by the host.
        status: u16,
        /// Leading part of the response body, for diagnostics.
        detail: String,
    },

    /// The body was not the JSON shape the endpoint promises.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for Maktaba operations.
pub type Result<T> = std::result::Result<T, MaktabaError>;
