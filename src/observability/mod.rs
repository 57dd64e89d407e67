//! OpenTelemetry tracing exported to a local JSON-lines file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter
//! → JSONL file
//! ```
//!
//! - Spans are written to `<data dir>/spotlite-trace.jsonl`, where the data
//!   directory is `spotlite` under `dirs::data_dir()` (usually
//!   `~/.local/share/spotlite`)
//! - [`init_tracing`] hands back a [`TracingGuard`] that flushes on drop
//! - The file rotates at 5 MiB into `.1`, `.2`, `.3` backups
//! - The level comes from `trace_level` in the config (default `"info"`)
//!
//! # Modules
//!
//! - [`init`]: subscriber setup and the flushing guard
//! - [`exporter`]: span exporter and tracer provider
//! - [`file_writer`]: rotating line writer

pub mod exporter;
pub mod file_writer;
pub mod init;

pub use init::{init_tracing, TracingGuard, TRACE_FILE_NAME};
