//! Configuration validation rules.
//!
//! This module provides validation logic for `ApiConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::ApiConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl ApiConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 10 minutes
    /// - `user_agent` is empty
    /// - `key` or `host` is set to an empty string
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 600_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 10 minutes (600000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if let Some(key) = &self.key
            && key.is_empty()
        {
            return Err(ConfigError::Invalid { field: "key".into(), reason: "must not be empty when set".into() });
        }

        if let Some(host) = &self.host
            && host.is_empty()
        {
            return Err(ConfigError::Invalid { field: "host".into(), reason: "must not be empty when set".into() });
        }

        if self.host.is_some() && self.key.is_some() {
            tracing::warn!("host override set; key-based host selection is bypassed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = ApiConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = ApiConfig { timeout_ms: 601_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = ApiConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_empty_key() {
        let config = ApiConfig { key: Some(String::new()), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "key"));
    }

    #[test]
    fn test_validate_empty_host() {
        let config = ApiConfig { host: Some(String::new()), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "host"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = ApiConfig { timeout_ms: 100, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = ApiConfig { timeout_ms: 600_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
