//! Subscriber setup: `EnvFilter` plus an OpenTelemetry layer exporting to a file.

use super::exporter::{file_tracer_provider, SCOPE_NAME};
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "maktaba-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global tracing subscriber.
///
/// Spans are filtered by `config.trace_level` (default `info`) and written as
/// OTLP JSON to `/data/maktaba-otlp.json`, which Zellij maps to the plugin's
/// data directory on the host.
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed, and calling this more than once keeps the first subscriber.
///
/// ```rust
/// use maktaba::observability::init_tracing;
/// use maktaba::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(SCOPE_NAME);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
