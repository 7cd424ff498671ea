//! Configuration for the delivery core.

use crate::error::DeliveryError;
use serde::Deserialize;

/// Delivery core configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Mailbox capacity of every actor
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Tracing directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Parses a JSON document; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, DeliveryError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| DeliveryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DeliveryError> {
        if self.channel_capacity == 0 {
            return Err(DeliveryError::InvalidConfig(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_channel_capacity() -> usize {
    32
}

fn default_log_filter() -> String {
    "info".to_string()
}
