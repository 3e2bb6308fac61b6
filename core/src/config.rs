//! Client configuration loaded with figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables with the `DOCPATH_` prefix
//!    (`DOCPATH_BASE_URL`, `DOCPATH_TIMEOUT_SECS`)
//! 2. Built-in defaults
//!
//! ```no_run
//! use docpath_client::ClientConfig;
//!
//! let config = ClientConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.base_url);
//! ```

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:3000`. Paths such as
    /// `/api/documents` are appended to it.
    pub base_url: String,
    /// Per-request timeout. Unset means requests run to completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load from defaults and `DOCPATH_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`ClientConfig::load`], after loading `.env` from the current
    /// directory if one exists.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed("DOCPATH_"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
