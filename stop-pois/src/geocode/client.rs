//! Gisgraphy geocoding HTTP client.

use roxmltree::{Document, Node};

use crate::error::{PipelineError, status_error};
use crate::geo::GeoPoint;

use super::{GeocodedAddress, Geocoder};

/// Default base URL for the geocoding service.
const DEFAULT_BASE_URL: &str = "https://services.gisgraphy.com";

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeocodingConfig {
    /// Create a config pointing at the public service.
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

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeocodingClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodingConfig) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl Geocoder for GeocodingClient {
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, PipelineError> {
        let url = format!("{}/geocoding/geocode", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("address", address)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("geocoding", status, &body));
        }

        let body = response.text().await?;
        parse_geocode_response(address, &body)
    }
}

/// Extract the first result from a geocoder XML response.
///
/// `address` is only used for error messages.
pub fn parse_geocode_response(address: &str, xml: &str) -> Result<GeocodedAddress, PipelineError> {
    let fail = |reason: String| PipelineError::Geocode {
        address: address.to_string(),
        reason,
    };

    let doc = Document::parse(xml).map_err(|e| fail(format!("malformed response: {e}")))?;

    let result = doc
        .root_element()
        .children()
        .find(|n| n.has_tag_name("result"))
        .ok_or_else(|| fail("no result".to_string()))?;

    let formatted = child_text(result, "formatedFull")
        .ok_or_else(|| fail("result has no formatted address".to_string()))?;
    let lat = parse_coordinate(result, "lat").map_err(fail)?;
    let lng = parse_coordinate(result, "lng").map_err(fail)?;

    let location = GeoPoint::validated(lat, lng).map_err(|e| fail(e.to_string()))?;

    Ok(GeocodedAddress {
        formatted: formatted.trim().to_string(),
        location,
    })
}

fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children().find(|n| n.has_tag_name(tag))?.text()
}

fn parse_coordinate(result: Node<'_, '_>, tag: &str) -> Result<f64, String> {
    let text = child_text(result, tag).ok_or_else(|| format!("result has no <{tag}>"))?;
    text.trim()
        .parse()
        .map_err(|_| format!("<{tag}> is not a number: {text:?}"))
}
