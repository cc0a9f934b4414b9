//! Tracing with OpenTelemetry spans exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → OtlpFileExporter → RotatingFile
//! ```
//!
//! Each exported batch is one OTLP JSON line in `maktaba-otlp.json` under the
//! plugin data directory. The file rotates at 10 MiB into `.1`, `.2` and `.3`.
//!
//! Web requests leave the plugin through the Zellij host and come back as
//! events, so the issuing span's trace context travels in the request context
//! map (see [`crate::loader::TraceContext`]) and response handling is parented
//! to it.
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: OTLP JSON span exporter and tracer provider
//! - [`file_writer`]: size-rotated file with numbered backups

pub mod exporter;
pub mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE_NAME};
