//! Wire types for the services listing and embed endpoints.
//!
//! Embed records are provider-shaped and heterogeneous (photo, video,
//! link, rich, error), so they are carried as raw `serde_json::Value`s.
//! Only the fixed-shape records get typed structs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One provider from the services listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDescriptor {
    /// Provider name, e.g. "youtube".
    #[serde(default)]
    pub name: String,

    /// URL patterns this provider can embed, in listed order.
    pub regex: Vec<String>,
}

/// Flatten provider patterns into a single alternation.
///
/// Provider order and pattern order within each provider are preserved.
pub fn combine_patterns(services: &[ServiceDescriptor]) -> String {
    services
        .iter()
        .flat_map(|service| service.regex.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("|")
}

/// Access-denied record synthesized for URLs outside the keyless allow-list.
///
/// Delivered through the normal result channel, not the error channel, so
/// one denied URL does not fail the rest of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub url: String,
    pub error_code: u16,
    pub error_message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
}

impl ErrorRecord {
    /// The record returned for a URL whose provider is not available
    /// without an API key.
    pub fn access_denied(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error_code: 401,
            error_message: "This service requires an Embedly Pro account".to_string(),
            kind: "error".to_string(),
            version: "1.0".to_string(),
        }
    }

    pub(crate) fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Ordered results of a call.
///
/// `records` holds one record per requested URL, in the same order as the
/// request, whether the record came back from the remote endpoint or was
/// synthesized locally. `urls` is the URL list of the original request.
#[derive(Debug, Clone, Serialize)]
pub struct CallOutcome {
    pub records: Vec<Value>,
    pub urls: Vec<String>,
}
