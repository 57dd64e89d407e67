//! OpenTelemetry span exporter writing one JSON object per line.
//!
//! Each finished span becomes a single compact line:
//!
//! ```json
//! {"time":"2024-05-01T09:30:00.123456Z","service":"spotlite","name":"aggregate",
//!  "traceId":"…","spanId":"…","parentSpanId":"…","durationUs":412,
//!  "status":"unset","attributes":{"query_len":2,"providers":3},"events":[…]}
//! ```
//!
//! Timestamps are RFC 3339 in UTC. Export is synchronous: the tracer provider
//! uses the simple span processor, so a span hits the file as soon as it ends.

use super::file_writer::FileWriter;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

const SERVICE_NAME_KEY: &str = "service.name";

/// Writes finished spans to a rotating JSON-lines file.
pub struct FileSpanExporter {
    writer: FileWriter,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    pub fn new(writer: FileWriter, resource: &Resource) -> Self {
        Self {
            writer,
            service: service_name(resource).unwrap_or_default(),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = batch
            .iter()
            .map(|span| format_span(span, &self.service).to_string())
            .try_for_each(|line| self.writer.write_line(&line))
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        if let Some(service) = service_name(res) {
            self.service = service;
        }
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Tracer provider exporting every span through a [`FileSpanExporter`].
pub fn create_tracer_provider(writer: FileWriter, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(writer, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn service_name(resource: &Resource) -> Option<String> {
    resource
        .iter()
        .find(|(key, _)| key.as_str() == SERVICE_NAME_KEY)
        .map(|(_, value)| value.to_string())
}

fn format_span(span: &SpanData, service: &str) -> JsonValue {
    let duration_us = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0, |d| d.as_micros());

    let mut line = json!({
        "time": rfc3339(span.end_time),
        "service": service,
        "name": span.name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "durationUs": u64::try_from(duration_us).unwrap_or(u64::MAX),
        "status": format_status(&span.status),
        "attributes": attributes_object(&span.attributes),
    });

    if span.parent_span_id != SpanId::INVALID {
        line["parentSpanId"] = json!(format!("{:016x}", span.parent_span_id));
    }

    if !span.events.is_empty() {
        line["events"] = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "time": rfc3339(event.timestamp),
                    "name": event.name,
                    "attributes": attributes_object(&event.attributes),
                })
            })
            .collect();
    }

    line
}

/// Formats a timestamp as RFC 3339 UTC with microseconds.
pub(crate) fn rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn format_status(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

fn attributes_object(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

/// Keeps booleans and numbers typed; everything else is rendered as text.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        other => json!(other.to_string()),
    }
}
