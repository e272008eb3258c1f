use serde::Deserialize;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// `tracing` env-filter directive, e.g. `info,errs_http=debug`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Output format of log lines
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_service_name() -> String {
    "errs".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}
