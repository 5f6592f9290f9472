//! Client configuration
//!
//! # Examples
//!
//! ```rust
//! use riskdesk_client::ClientConfig;
//!
//! let config = ClientConfig::new("https://risk.example.com/api")
//!     .with_api_key("secret-key")
//!     .with_timeout_secs(10);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the rules backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Static key sent as `x-api-key` on every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL without trailing slashes
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Validate that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.normalized_base_url();
        if base.is_empty() {
            return Err(ConfigError::MissingField {
                field: "base_url".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                field: "base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{}'", base),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidField {
                field: "timeout_secs".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost:8080/")
            .with_api_key("k")
            .with_timeout_secs(5);
        assert_eq!(config.normalized_base_url(), "http://localhost:8080");
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_base_url() {
        let config = ClientConfig::new("  ");
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField {
                field: "base_url".to_string()
            })
        );
    }

    #[test]
    fn test_validate_scheme_and_timeout() {
        assert!(ClientConfig::new("ftp://host").validate().is_err());
        assert!(ClientConfig::new("http://host")
            .with_timeout_secs(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url": "https://risk.example.com"}"#).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.api_key.is_none());
    }
}
