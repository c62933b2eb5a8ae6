//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans are written to `image-finder-otlp.json` in the plugin data directory
//! (`/data` inside the Zellij sandbox). The file rotates at 10 MB and keeps
//! three backups.
//!
//! The filter level comes from the `trace_level` plugin option and uses
//! [`tracing_subscriber::EnvFilter`] directive syntax, e.g. `debug` or
//! `image_finder::gateway=trace`. The default is `info`; `off` disables
//! tracing.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider and file span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
