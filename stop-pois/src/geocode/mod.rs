//! Address geocoding.
//!
//! Resolves the configured home address to coordinates. The provider
//! answers in XML; only the first result is used.

mod client;

pub use client::{GeocodingClient, GeocodingConfig, parse_geocode_response};

use crate::error::PipelineError;
use crate::geo::GeoPoint;

/// An address as canonicalized by the geocoder, with its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    pub formatted: String,
    pub location: GeoPoint,
}

/// Something that can turn an address into coordinates.
pub trait Geocoder {
    /// Resolve `address`, failing with [`PipelineError::Geocode`] if it
    /// cannot be found.
    async fn geocode(&self, address: &str) -> Result<GeocodedAddress, PipelineError>;
}
