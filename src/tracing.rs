//! Logging setup
//!
//! Console output goes to stderr, filtered by `RUST_LOG` (default `warn`).
//! `RUST_LOG=statgrid::csv=debug` narrows it to the import pipeline.
//! Debug output is also kept in `<config dir>/logs/statgrid.log`, rotated
//! daily, whenever that directory can be created.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config_paths::{ensure_logs_dir, LOG_FILE_NAME};

const DEFAULT_CONSOLE_FILTER: &str = "warn";

/// Daily rolling debug log; fails when no logs directory is available
fn file_layer<S>() -> Result<impl Layer<S>, String>
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    let logs_dir = ensure_logs_dir()?;
    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_NAME);
    Ok(fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_line_number(true)
        .with_filter(EnvFilter::new("debug")))
}

/// Install the subscribers. Call once, from `main`.
pub fn init() {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_filter(console_filter);

    let (file_layer, file_error) = match file_layer() {
        Ok(layer) => (Some(layer), None),
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(error) = file_error {
        tracing::warn!(%error, "file logging disabled");
    }
}
