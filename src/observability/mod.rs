//! Logging and span export to local files.
//!
//! ```text
//! tracing macros ─┬─ fmt layer ──────────────→ gourmet.log
//!                 └─ OpenTelemetryLayer ─→ FileSpanExporter ─→ gourmet-otlp.json
//! ```
//!
//! Both files live in the data directory and rotate at 10 MB, keeping three
//! backups. The OTLP layer is off unless `otlp_export = true`. Filtering
//! honours `RUST_LOG` first, then the `trace_level` config key, then `info`.
//!
//! The terminal belongs to the UI, so nothing is ever logged to stdout or
//! stderr.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::FileWriter;
pub use init::{init_tracing, init_tracing_in, shutdown_tracing, LOG_FILE, OTLP_FILE};
