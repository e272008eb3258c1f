#![allow(clippy::must_use_candidate)]

mod loader;
pub mod response;
pub mod telemetry;

use serde::Deserialize;

pub use response::ResponseConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
    /// Error response configuration
    #[serde(default)]
    pub response: ResponseConfig,
}
