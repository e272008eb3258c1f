use serde::Deserialize;

/// Message sent to clients when an error carries nothing that may be shown
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Unexpected error - contact support";

/// Error response configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    /// Client message for errors that are not classified
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            fallback_message: default_fallback_message(),
        }
    }
}

fn default_fallback_message() -> String {
    DEFAULT_FALLBACK_MESSAGE.to_string()
}
