//! Embedly API client error types.

use std::sync::Arc;

use embedly_core::ConfigError;

/// Errors from the Embedly API client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Endpoint name outside the fixed path table.
    #[error("endpoint: {0} not supported")]
    UnknownEndpoint(String),

    /// Request rejected before dispatch.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configured host is not a usable http(s) URL.
    #[error("invalid host: {0}")]
    InvalidHost(String),

    /// Combined provider pattern failed to compile.
    #[error("invalid service pattern: {0}")]
    ServicePattern(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// Remote record count does not line up with the URLs sent.
    #[error("response mismatch: sent {expected} urls, got {actual} records")]
    ResponseMismatch { expected: usize, actual: usize },

    /// Configuration loading or validation failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::UnknownEndpoint("embed".to_string());
        assert_eq!(err.to_string(), "endpoint: embed not supported");

        let err = ApiError::ResponseMismatch { expected: 2, actual: 1 };
        assert!(err.to_string().contains("sent 2 urls"));

        let err = ApiError::InvalidRequest("urls cannot be empty".to_string());
        assert!(err.to_string().contains("invalid request"));
    }
}
