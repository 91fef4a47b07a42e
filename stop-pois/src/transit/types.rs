//! Transit directory response types.
//!
//! Only the fields the pipeline relies on are modelled; everything else in
//! the provider's records is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::geo::GeoPoint;

const PROVIDER: &str = "transit";

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    routes: Vec<Route>,
}

/// A transit route and the stops it serves, in order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Route {
    pub name: String,
    pub vehicle_type: String,
    #[serde(rename = "operated_by_name")]
    pub operator_name: String,
    #[serde(rename = "stops_served_by_route", default)]
    pub stops: Vec<StopRef>,
}

impl Route {
    /// Identifiers of the stops served, in route order.
    pub fn stop_ids(&self) -> Vec<String> {
        self.stops.iter().map(|s| s.id.clone()).collect()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), operated by {}",
            self.name, self.vehicle_type, self.operator_name
        )
    }
}

/// Reference from a route to one of its stops.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopRef {
    #[serde(rename = "stop_onestop_id")]
    pub id: String,
    #[serde(rename = "stop_name", default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StopsResponse {
    stops: Vec<StopDto>,
}

#[derive(Debug, Deserialize)]
struct StopDto {
    onestop_id: String,
    name: String,
    geometry: PointGeometry,
}

/// GeoJSON point; coordinates are `[longitude, latitude]`.
#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

/// A stop with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
}

impl TryFrom<StopDto> for Stop {
    type Error = PipelineError;

    fn try_from(dto: StopDto) -> Result<Self, Self::Error> {
        let [lon, lat] = dto.geometry.coordinates[..] else {
            return Err(PipelineError::provider(
                PROVIDER,
                format!(
                    "stop {} has {} coordinates, expected 2",
                    dto.onestop_id,
                    dto.geometry.coordinates.len()
                ),
            ));
        };

        let location = GeoPoint::validated(lat, lon).map_err(|e| {
            PipelineError::provider(PROVIDER, format!("stop {}: {e}", dto.onestop_id))
        })?;

        Ok(Stop {
            id: dto.onestop_id,
            name: dto.name,
            location,
        })
    }
}

/// Parse a raw routes response.
pub fn parse_routes(json: &str) -> Result<Vec<Route>, PipelineError> {
    let response: RoutesResponse = serde_json::from_str(json)
        .map_err(|e| PipelineError::provider(PROVIDER, format!("invalid routes response: {e}")))?;
    Ok(response.routes)
}

/// Parse a raw stops response, keeping the provider's order.
pub fn parse_stops(json: &str) -> Result<Vec<Stop>, PipelineError> {
    let response: StopsResponse = serde_json::from_str(json)
        .map_err(|e| PipelineError::provider(PROVIDER, format!("invalid stops response: {e}")))?;
    response.stops.into_iter().map(Stop::try_from).collect()
}

/// The first route whose name starts with `prefix`.
pub fn select_route<'a>(routes: &'a [Route], prefix: &str) -> Result<&'a Route, PipelineError> {
    routes
        .iter()
        .find(|r| r.name.starts_with(prefix))
        .ok_or_else(|| PipelineError::NoMatchingRoute {
            prefix: prefix.to_string(),
        })
}
