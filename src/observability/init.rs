//! Subscriber setup.

use super::exporter;
use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "spotlite-trace.jsonl";

const SERVICE_NAME: &str = "spotlite";
const DEFAULT_LEVEL: &str = "info";

/// Owns the tracer provider for the lifetime of the session.
///
/// Dropping the guard flushes pending spans and shuts the exporter down, so
/// hold it until the process is about to exit.
#[must_use = "dropping the guard shuts tracing down"]
pub struct TracingGuard {
    provider: TracerProvider,
}

impl TracingGuard {
    /// Wraps a provider so it is flushed and shut down on drop.
    pub fn new(provider: TracerProvider) -> Self {
        Self { provider }
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        for result in self.provider.force_flush() {
            if let Err(e) = result {
                eprintln!("spotlite: trace flush failed: {e}");
            }
        }
        if let Err(e) = self.provider.shutdown() {
            eprintln!("spotlite: trace shutdown failed: {e}");
        }
    }
}

/// Builds the level filter. A level string that does not parse falls back to
/// `"info"` instead of silently dropping the bad directive.
fn env_filter(level: Option<&str>) -> EnvFilter {
    let level = level.unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("spotlite: invalid trace_level '{level}' ({e}), using {DEFAULT_LEVEL}");
        EnvFilter::new(DEFAULT_LEVEL)
    })
}

/// Installs the global subscriber: an [`EnvFilter`] at `config.trace_level`
/// (default `"info"`) feeding an OpenTelemetry layer that writes finished
/// spans to `<data dir>/spotlite-trace.jsonl`.
///
/// Best-effort. Returns `None`, and the launcher runs without tracing, if the
/// data directory cannot be created or a global subscriber is already set.
///
/// # Example
///
/// ```rust,no_run
/// use spotlite::observability::init_tracing;
/// use spotlite::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// let _tracing = init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<TracingGuard> {
    let data_dir = paths::data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let writer = FileWriter::new(data_dir.join(TRACE_FILE_NAME));
    let provider = exporter::create_tracer_provider(writer, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(env_filter(config.trace_level.as_deref()))
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(TracingGuard::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span as _, Tracer as _};
    use tempfile::TempDir;

    #[test]
    fn configured_level_is_used() {
        assert_eq!(env_filter(Some("debug")).to_string(), "debug");
        assert_eq!(env_filter(None).to_string(), DEFAULT_LEVEL);
    }

    #[test]
    fn unparsable_level_falls_back_to_info() {
        assert_eq!(env_filter(Some("spotlite=verbose")).to_string(), DEFAULT_LEVEL);
    }

    #[test]
    fn dropping_the_guard_leaves_spans_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TRACE_FILE_NAME);
        let resource = Resource::new(vec![opentelemetry::KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]);
        let provider = exporter::create_tracer_provider(FileWriter::new(path.clone()), resource);

        let mut span = provider.tracer(SERVICE_NAME).start("session");
        span.end();
        drop(TracingGuard::new(provider));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("\"name\":\"session\""));
    }
}
