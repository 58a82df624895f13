//! Asynchronous fetch with timeout.
//!
//! The client core only needs one capability from the outside world: GET a
//! URL with query parameters and deliver parsed JSON or a failure, exactly
//! once, failing on its own after the configured timeout. The `Transport`
//! trait keeps that seam open for embedders and tests; `HttpTransport` is
//! the reqwest implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use crate::api::ApiError;

/// A single-shot asynchronous GET returning parsed JSON.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the request. Resolves exactly once: a parsed payload on
    /// success, an `ApiError` on transport failure or timeout.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, ApiError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests auto-fail after `timeout`.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ApiError::Network(Arc::new(e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        let start = Instant::now();

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::Http { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let payload: Value =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Parse(e.to_string()))?;

        tracing::debug!("fetched {} in {:?} ({} bytes)", url, start.elapsed(), bytes.len());

        Ok(payload)
    }
}
