//! Yelp Fusion business search client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::{PipelineError, status_error};

use super::BusinessSearch;
use super::filters::SearchQuery;
use super::pagination::PageRequest;
use super::types::{SearchPage, parse_search_page};

/// Default base URL for the Yelp Fusion API.
const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

/// Configuration for the business search client.
#[derive(Clone)]
pub struct YelpConfig {
    /// API key, sent as a bearer token
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl YelpConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for YelpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YelpConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Client for the Yelp business search endpoint.
#[derive(Debug, Clone)]
pub struct YelpClient {
    http: reqwest::Client,
    base_url: String,
}

impl YelpClient {
    /// Create a new business search client.
    pub fn new(config: YelpConfig) -> Result<Self, PipelineError> {
        if config.api_key.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "business search API key is empty".to_string(),
            ));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| PipelineError::Configuration("invalid API key format".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl BusinessSearch for YelpClient {
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, PipelineError> {
        let url = format!("{}/businesses/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", query.location.latitude.to_string()),
                ("longitude", query.location.longitude.to_string()),
                ("radius", query.radius_meters.to_string()),
                ("categories", query.categories.clone()),
                ("price", query.price.clone()),
                ("sort_by", query.sort_by.clone()),
                ("limit", page.limit.to_string()),
                ("offset", page.offset.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("business search", status, &body));
        }

        let body = response.text().await?;
        parse_search_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = YelpConfig::new("test-api-key");
        assert_eq!(config.api_key, "test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_base_url() {
        let config = YelpConfig::new("test-api-key").with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn debug_hides_api_key() {
        let config = YelpConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn empty_key_is_configuration_error() {
        let err = YelpClient::new(YelpConfig::new("  ")).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let err = YelpClient::new(YelpConfig::new("abc\ndef")).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }
}
