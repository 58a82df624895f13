//! Endpoint table and call parameters.

use std::fmt;
use std::str::FromStr;

use crate::api::ApiError;

/// The fixed set of embed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Oembed,
    Objectify,
    Preview,
}

impl Endpoint {
    /// URL path for this endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Oembed => "/1/oembed",
            Endpoint::Objectify => "/2/objectify",
            Endpoint::Preview => "/1/preview",
        }
    }

    /// The wire name used to select this endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Oembed => "oembed",
            Endpoint::Objectify => "objectify",
            Endpoint::Preview => "preview",
        }
    }
}

impl FromStr for Endpoint {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oembed" => Ok(Endpoint::Oembed),
            "objectify" => Ok(Endpoint::Objectify),
            "preview" => Ok(Endpoint::Preview),
            other => Err(ApiError::UnknownEndpoint(other.to_string())),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for a call to an embed endpoint.
///
/// `urls` is the only required field; its order determines the order of the
/// result list. Everything in `extra` is passed through to the endpoint
/// untouched (maxwidth, wmode, and other provider-specific parameters).
#[derive(Debug, Clone, Default)]
pub struct CallParams {
    /// URLs to embed, in the order results should come back.
    pub urls: Vec<String>,

    /// API key for this call. When absent, the client's configured key is
    /// injected at dispatch time.
    pub key: Option<String>,

    /// Additional query parameters, appended in the given order.
    pub extra: Vec<(String, String)>,
}

impl CallParams {
    /// Parameters for the given URLs.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { urls: urls.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    /// Set the API key for this call.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Append a provider-specific query parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((name.into(), value.into()));
        self
    }

    /// Validate the call parameters.
    ///
    /// The only shape requirement is at least one URL; anything else is
    /// left to the remote endpoint to reject.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.urls.is_empty() {
            return Err(ApiError::InvalidRequest("urls cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Query pairs for the wire, with `urls` replaced by the given subset.
    pub(crate) fn query_pairs(&self, urls: &[String]) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> =
            urls.iter().map(|url| ("urls".to_string(), url.clone())).collect();

        if let Some(key) = &self.key {
            pairs.push(("key".to_string(), key.clone()));
        }

        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Oembed.path(), "/1/oembed");
        assert_eq!(Endpoint::Objectify.path(), "/2/objectify");
        assert_eq!(Endpoint::Preview.path(), "/1/preview");
    }

    #[test]
    fn test_endpoint_from_str() {
        assert_eq!("oembed".parse::<Endpoint>().unwrap(), Endpoint::Oembed);
        assert_eq!("objectify".parse::<Endpoint>().unwrap(), Endpoint::Objectify);
        assert_eq!("preview".parse::<Endpoint>().unwrap(), Endpoint::Preview);
    }

    #[test]
    fn test_endpoint_unknown_name() {
        let result = "embed".parse::<Endpoint>();
        assert!(matches!(result, Err(ApiError::UnknownEndpoint(name)) if name == "embed"));
    }

    #[test]
    fn test_endpoint_display_roundtrip() {
        for endpoint in [Endpoint::Oembed, Endpoint::Objectify, Endpoint::Preview] {
            assert_eq!(endpoint.to_string().parse::<Endpoint>().unwrap(), endpoint);
        }
    }

    #[test]
    fn test_validate_requires_urls() {
        let params = CallParams::default();
        assert!(matches!(params.validate(), Err(ApiError::InvalidRequest(_))));

        let params = CallParams::new(["http://example.com"]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_query_pairs_repeats_urls_in_order() {
        let params = CallParams::new(["http://a.com", "http://b.com"]);
        let pairs = params.query_pairs(&params.urls);
        assert_eq!(
            pairs,
            vec![
                ("urls".to_string(), "http://a.com".to_string()),
                ("urls".to_string(), "http://b.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_with_key_and_extra() {
        let params = CallParams::new(["http://a.com"])
            .with_key("xxxx")
            .with_param("maxwidth", "600");
        let pairs = params.query_pairs(&params.urls);
        assert_eq!(
            pairs,
            vec![
                ("urls".to_string(), "http://a.com".to_string()),
                ("key".to_string(), "xxxx".to_string()),
                ("maxwidth".to_string(), "600".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_uses_given_subset() {
        let params = CallParams::new(["http://a.com", "http://b.com", "http://c.com"]);
        let subset = vec!["http://b.com".to_string()];
        let pairs = params.query_pairs(&subset);
        assert_eq!(pairs, vec![("urls".to_string(), "http://b.com".to_string())]);
    }
}
