//! Discovery pipeline orchestration.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{CacheStore, StageCache, StageKey};
use crate::error::PipelineError;
use crate::geo::BoundingBox;
use crate::geocode::Geocoder;
use crate::poi::{Business, BusinessSearch, SearchFilters, search_near};
use crate::taxonomy::CategoryTaxonomy;
use crate::transit::{Stop, TransitProvider, parse_routes, parse_stops, select_route};

/// Businesses found around one stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopResult {
    pub stop: Stop,
    pub businesses: Vec<Business>,
}

impl StopResult {
    /// Split businesses into (food, other), each in arrival order.
    pub fn partition_food(&self, taxonomy: &CategoryTaxonomy) -> (Vec<&Business>, Vec<&Business>) {
        self.businesses
            .iter()
            .partition(|b| taxonomy.is_food(b.category_aliases()))
    }
}

/// Parse the cached POI stage.
pub fn parse_stop_results(json: &str) -> Result<Vec<StopResult>, PipelineError> {
    serde_json::from_str(json).map_err(|e| PipelineError::Cache {
        message: format!("invalid {} stage content: {e}", StageKey::Pois),
    })
}

/// Runs discovery against a set of providers, caching each stage.
pub struct DiscoveryPipeline<G, T, P, S> {
    geocoder: G,
    transit: T,
    search: P,
    cache: StageCache<S>,
    filters: SearchFilters,
}

impl<G, T, P, S> DiscoveryPipeline<G, T, P, S>
where
    G: Geocoder,
    T: TransitProvider,
    P: BusinessSearch,
    S: CacheStore,
{
    /// Create a pipeline.
    pub fn new(geocoder: G, transit: T, search: P, store: S, filters: SearchFilters) -> Self {
        Self {
            geocoder,
            transit,
            search,
            cache: StageCache::new(store),
            filters,
        }
    }

    /// Discover businesses within `walk_radius_miles` of every stop on the
    /// first route near `home_address` whose name starts with
    /// `route_prefix`.
    ///
    /// Results follow the provider's stop order. Any failure aborts the
    /// whole run.
    pub async fn run(
        &self,
        home_address: &str,
        route_prefix: &str,
        walk_radius_miles: f64,
    ) -> Result<Vec<StopResult>, PipelineError> {
        let home = self.geocoder.geocode(home_address).await?;
        info!(
            address = %home.formatted,
            location = %home.location,
            "resolved home address"
        );

        let bbox = BoundingBox::around(home.location, walk_radius_miles);
        debug!(?bbox, "search area");

        let routes = self
            .cache
            .get_or_fetch(StageKey::Routes, || self.transit.fetch_routes(&bbox))
            .await?;
        let routes = parse_routes(&routes)?;
        debug!(candidates = routes.len(), "routes near home");

        let route = select_route(&routes, route_prefix)?;
        info!(route = %route, stops = route.stops.len(), "selected route");

        let stop_ids = route.stop_ids();
        let stops = self
            .cache
            .get_or_fetch(StageKey::Stops, || self.transit.fetch_stops(&stop_ids))
            .await?;
        let stops = parse_stops(&stops)?;

        let pois = self
            .cache
            .get_or_fetch(StageKey::Pois, || {
                self.fetch_pois(&stops, walk_radius_miles)
            })
            .await?;

        parse_stop_results(&pois)
    }

    /// Search every stop in turn and serialize the results as one unit.
    async fn fetch_pois(
        &self,
        stops: &[Stop],
        walk_radius_miles: f64,
    ) -> Result<String, PipelineError> {
        let mut results = Vec::with_capacity(stops.len());

        for stop in stops {
            let businesses =
                search_near(&self.search, &self.filters, stop.location, walk_radius_miles).await?;
            info!(stop = %stop.name, businesses = businesses.len(), "searched stop");

            results.push(StopResult {
                stop: stop.clone(),
                businesses,
            });
        }

        serde_json::to_string(&results).map_err(|e| PipelineError::Cache {
            message: format!("failed to serialize {} stage: {e}", StageKey::Pois),
        })
    }

    /// The cache backing this pipeline.
    pub fn cache(&self) -> &StageCache<S> {
        &self.cache
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
