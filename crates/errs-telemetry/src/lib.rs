//! Logging setup
//!
//! Installs a `tracing-subscriber` registry with an env-filter and a fmt
//! layer writing either text or JSON lines.

use errs_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging from configuration
///
/// `log_filter` overrides the filter from `config` when given. Invalid
/// filters fall back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&TelemetryConfig>, log_filter: Option<&str>) -> anyhow::Result<()> {
    let defaults = TelemetryConfig::default();
    let config = config.unwrap_or(&defaults);

    let directive = log_filter.unwrap_or(&config.log_filter);
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter `{directive}`, falling back to info: {e}");
        EnvFilter::new("info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(config.format))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    tracing::debug!(service = %config.service_name, "logging initialized");

    Ok(())
}

fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}
