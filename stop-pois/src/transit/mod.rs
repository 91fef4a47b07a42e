//! Transit route and stop directory.
//!
//! Routes are looked up by bounding box; the stops of one route are then
//! fetched by their identifiers. Raw response bodies are what gets cached,
//! so fetching and parsing are kept apart.

mod client;
mod types;

pub use client::{TransitClient, TransitConfig};
pub use types::{Route, Stop, StopRef, parse_routes, parse_stops, select_route};

use crate::error::PipelineError;
use crate::geo::BoundingBox;

/// Source of routes and stops.
pub trait TransitProvider {
    /// Raw routes response for routes passing through `bbox`.
    async fn fetch_routes(&self, bbox: &BoundingBox) -> Result<String, PipelineError>;

    /// Raw stops response for the given stop identifiers.
    async fn fetch_stops(&self, stop_ids: &[String]) -> Result<String, PipelineError>;
}
