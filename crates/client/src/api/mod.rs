//! Embedly API client.
//!
//! Provides a client for the Embedly embed endpoints (`oembed`,
//! `objectify`, `preview`) and the services listing.
//!
//! ### Specification
//!
//! - **Hosts**: `http://api.embed.ly` for keyless use, `http://pro.embed.ly`
//!   once an API key is configured. An explicit host override wins over both.
//! - **Authentication**: `key` query parameter, injected from the client
//!   configuration when the call params carry none.
//! - **Gating**: keyless `oembed` calls are checked against the provider
//!   patterns from `/1/services/javascript` first; URLs outside the listing
//!   get a synthesized 401 record instead of a remote round trip.
//! - **Ordering**: the result list lines up one-to-one with the requested
//!   URLs, whichever path each URL took.

pub mod error;
pub mod request;
pub mod response;

pub use error::ApiError;
pub use request::{CallParams, Endpoint};
pub use response::{CallOutcome, ErrorRecord, ServiceDescriptor, combine_patterns};

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use embedly_core::ApiConfig;

use crate::transport::{HttpTransport, Transport};

/// Path of the services listing used to build the keyless allow-list.
const SERVICES_PATH: &str = "/1/services/javascript";

/// Embedly API client.
///
/// Cheap to clone; the transport is shared. Each call is an independent
/// request/response exchange with no state carried across calls.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    host: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Create a client over the reqwest transport.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config.timeout(), &config.user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client from `EMBEDLY_*` environment configuration.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::load()?)
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        let host = resolve_host(&config)?;

        Ok(Self { config, host, transport })
    }

    /// The host every request goes to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch the current provider listing.
    ///
    /// The listing is fetched per call and never cached, so access
    /// decisions stay as fresh as the remote side. No retry.
    pub async fn services(&self) -> Result<Vec<ServiceDescriptor>, ApiError> {
        let url = format!("{}{}", self.host, SERVICES_PATH);

        let payload = match self.transport.get(&url, &[]).await {
            Ok(payload) => payload,
            Err(err) => {
                if self.config.debug {
                    tracing::debug!("error getting services: {err}");
                }
                return Err(err);
            }
        };

        serde_json::from_value(payload).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// One alternation pattern covering every supported provider.
    pub async fn services_regex(&self) -> Result<String, ApiError> {
        let services = self.services().await?;
        Ok(combine_patterns(&services))
    }

    /// Call an embed endpoint by name.
    ///
    /// Returns one record per requested URL, in request order. Keyless
    /// `oembed` calls go through provider gating; everything else is a
    /// single direct exchange. An unknown endpoint name fails before any
    /// request is issued.
    pub async fn call(&self, endpoint: &str, params: CallParams) -> Result<CallOutcome, ApiError> {
        let endpoint = endpoint.parse::<Endpoint>()?;
        params.validate()?;

        let mut params = params;
        if params.key.is_none() && self.config.key.is_some() {
            params.key = self.config.key.clone();
        }

        if params.key.is_none() && endpoint == Endpoint::Oembed {
            return self.call_gated(params).await;
        }

        let records = self.dispatch(endpoint, &params, &params.urls).await?;
        Ok(CallOutcome { records, urls: params.urls })
    }

    /// `call("oembed", ...)`.
    pub async fn oembed(&self, params: CallParams) -> Result<CallOutcome, ApiError> {
        self.call(Endpoint::Oembed.name(), params).await
    }

    /// `call("objectify", ...)`.
    pub async fn objectify(&self, params: CallParams) -> Result<CallOutcome, ApiError> {
        self.call(Endpoint::Objectify.name(), params).await
    }

    /// `call("preview", ...)`.
    pub async fn preview(&self, params: CallParams) -> Result<CallOutcome, ApiError> {
        self.call(Endpoint::Preview.name(), params).await
    }

    /// Keyless oembed path: validate every URL against the provider
    /// patterns, fetch only the eligible ones, reassemble in request order.
    async fn call_gated(&self, params: CallParams) -> Result<CallOutcome, ApiError> {
        let pattern = self.services_regex().await?;
        let allowed = Regex::new(&pattern).map_err(|e| ApiError::ServicePattern(e.to_string()))?;

        // One slot per requested URL. Denied URLs are filled immediately;
        // eligible ones stay empty until the remote records come back.
        let mut slots: Vec<Option<Value>> = Vec::with_capacity(params.urls.len());
        let mut eligible: Vec<String> = Vec::new();

        for url in &params.urls {
            if allowed.is_match(url) {
                slots.push(None);
                eligible.push(url.clone());
            } else {
                slots.push(Some(ErrorRecord::access_denied(url).into_value()));
            }
        }

        if self.config.debug {
            tracing::debug!(requested = params.urls.len(), eligible = eligible.len(), "gated oembed call");
        }

        if eligible.is_empty() {
            let records = slots.into_iter().flatten().collect();
            return Ok(CallOutcome { records, urls: params.urls });
        }

        let expected = eligible.len();
        let remote = self.dispatch(Endpoint::Oembed, &params, &eligible).await?;
        let actual = remote.len();

        // The remote records come back in the order the eligible URLs were
        // sent, so one cursor fills the empty slots front to back.
        let mut remote = remote.into_iter();
        let mut records = Vec::with_capacity(slots.len());
        for slot in slots {
            let record = match slot {
                Some(denied) => denied,
                None => remote.next().ok_or(ApiError::ResponseMismatch { expected, actual })?,
            };
            records.push(record);
        }

        if remote.next().is_some() {
            return Err(ApiError::ResponseMismatch { expected, actual });
        }

        Ok(CallOutcome { records, urls: params.urls })
    }

    /// One request/response exchange with an embed endpoint.
    async fn dispatch(&self, endpoint: Endpoint, params: &CallParams, urls: &[String]) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}{}", self.host, endpoint.path());
        let query = params.query_pairs(urls);

        tracing::debug!("calling {} with {} urls", endpoint, urls.len());

        match self.transport.get(&url, &query).await? {
            Value::Array(records) => Ok(records),
            _ => Err(ApiError::Parse("expected an array of records".to_string())),
        }
    }
}

/// Validate the configured host and strip any trailing slash.
fn resolve_host(config: &ApiConfig) -> Result<String, ApiError> {
    let host = config.resolved_host();

    let parsed = url::Url::parse(host).map_err(|e| ApiError::InvalidHost(format!("{host}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(ApiError::InvalidHost(format!("unsupported scheme: {scheme}"))),
    }

    Ok(host.trim_end_matches('/').to_string())
}
