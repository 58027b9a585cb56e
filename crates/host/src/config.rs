use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

/// Default capacity of the channel between gateways and the node.
pub const DEFAULT_REQUEST_BUFFER: usize = 1000;
/// Default upper bound on a single gateway request.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Requests queued for the node before gateways start waiting.
    pub request_buffer: usize,
    /// How long a gateway waits for the node to answer a request.
    #[serde(with = "humantime_serde")]
    pub call_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            request_buffer: DEFAULT_REQUEST_BUFFER,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl NodeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(?path, "loading node config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_buffer == 0 {
            return Err(ConfigError::Invalid("request_buffer must be greater than zero"));
        }
        if self.call_timeout.is_zero() {
            return Err(ConfigError::Invalid("call_timeout must be greater than zero"));
        }
        Ok(())
    }
}
