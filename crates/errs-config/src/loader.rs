use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails, or
    /// validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        raw.parse()
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.response.fallback_message.trim().is_empty() {
            anyhow::bail!("response.fallback_message must not be empty");
        }

        if let Some(ref telemetry) = self.telemetry {
            if telemetry.service_name.trim().is_empty() {
                anyhow::bail!("telemetry.service_name must not be empty");
            }
            if telemetry.log_filter.trim().is_empty() {
                anyhow::bail!("telemetry.log_filter must not be empty");
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    /// Parse and validate configuration from TOML text
    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }
}
