//! Client configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (EMBEDLY_*)
//! 2. TOML config file (if EMBEDLY_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Default host once an API key is configured.
pub const PRO_HOST: &str = "http://pro.embed.ly";

/// Default host for keyless access.
pub const FREE_HOST: &str = "http://api.embed.ly";

/// Client configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (EMBEDLY_*)
/// 2. TOML config file (if EMBEDLY_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Embedly Pro API key.
    ///
    /// Set via EMBEDLY_KEY environment variable. When present, requests
    /// default to the pro host.
    #[serde(default)]
    pub key: Option<String>,

    /// Explicit API host override.
    ///
    /// Set via EMBEDLY_HOST environment variable. Takes precedence over
    /// both key-based host defaults.
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via EMBEDLY_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via EMBEDLY_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Log per-call gating decisions at debug level.
    ///
    /// Set via EMBEDLY_DEBUG environment variable.
    #[serde(default)]
    pub debug: bool,
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_user_agent() -> String {
    "embedly-client/0.1".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            host: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            debug: false,
        }
    }
}

impl ApiConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The host requests will go to.
    ///
    /// An explicit `host` always wins; otherwise the pro host when a key
    /// is set and the free host when not.
    pub fn resolved_host(&self) -> &str {
        match &self.host {
            Some(host) => host,
            None if self.key.is_some() => PRO_HOST,
            None => FREE_HOST,
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `EMBEDLY_`
    /// 2. TOML file from `EMBEDLY_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("EMBEDLY_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("EMBEDLY_").map(|key| key.as_str().to_lowercase().into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.key.is_none());
        assert!(config.host.is_none());
        assert_eq!(config.timeout_ms, 120_000);
        assert_eq!(config.user_agent, "embedly-client/0.1");
        assert!(!config.debug);
    }

    #[test]
    fn test_timeout_duration() {
        let config = ApiConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(120_000));
    }

    #[test]
    fn test_resolved_host_keyless() {
        let config = ApiConfig::default();
        assert_eq!(config.resolved_host(), FREE_HOST);
    }

    #[test]
    fn test_resolved_host_with_key() {
        let config = ApiConfig { key: Some("xxxx".into()), ..Default::default() };
        assert_eq!(config.resolved_host(), PRO_HOST);
    }

    #[test]
    fn test_resolved_host_override_wins() {
        let config = ApiConfig {
            key: Some("xxxx".into()),
            host: Some("http://localhost:8000".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_host(), "http://localhost:8000");

        let config = ApiConfig { host: Some("http://localhost:8000".into()), ..Default::default() };
        assert_eq!(config.resolved_host(), "http://localhost:8000");
    }
}
