//! Subscriber setup.

use super::file_writer::FileWriter;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use std::sync::Arc;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Plain-text log file under the data directory.
pub const LOG_FILE: &str = "gourmet.log";

/// OTLP span file, written only when `otlp_export` is on.
pub const OTLP_FILE: &str = "gourmet-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber, logging under the platform data
/// directory.
///
/// Best-effort: if the directory cannot be created or a subscriber is
/// already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    init_tracing_in(config, &crate::infrastructure::get_data_dir());
}

/// Like [`init_tracing`], writing log files into `dir`.
pub fn init_tracing_in(config: &Config, dir: &Path) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    });

    let log_writer = Arc::new(FileWriter::new(dir.join(LOG_FILE)));
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(log_writer);

    let otel_layer = config.otlp_export.then(|| {
        let resource = Resource::new(vec![
            opentelemetry::KeyValue::new("service.name", "gourmet"),
            opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = tracer::create_tracer_provider(dir.join(OTLP_FILE), resource);
        let tracer = provider.tracer("gourmet");
        opentelemetry::global::set_tracer_provider(provider);
        OpenTelemetryLayer::new(tracer)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}

/// Flushes and shuts down the span exporter, if one was installed.
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}
