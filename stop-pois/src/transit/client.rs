//! Transitland HTTP client.

use tracing::debug;

use crate::error::{PipelineError, status_error};
use crate::geo::BoundingBox;

use super::TransitProvider;

/// Default base URL for the transit directory.
const DEFAULT_BASE_URL: &str = "https://transit.land/api/v1";

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitConfig {
    /// Create a config pointing at the public directory.
    pub fn new() -> Self {
        Self {
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

impl Default for TransitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the transit route/stop directory.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransitClient {
    /// Create a new transit client.
    pub fn new(config: TransitConfig) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, PipelineError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, ?query, "transit request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("transit", status, &body));
        }

        Ok(response.text().await?)
    }
}

impl TransitProvider for TransitClient {
    async fn fetch_routes(&self, bbox: &BoundingBox) -> Result<String, PipelineError> {
        self.get("routes", &[("bbox", bbox.to_query_param())]).await
    }

    async fn fetch_stops(&self, stop_ids: &[String]) -> Result<String, PipelineError> {
        self.get("stops", &[("onestop_id", stop_ids.join(","))])
            .await
    }
}
