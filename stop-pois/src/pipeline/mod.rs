//! End-to-end POI discovery.
//!
//! Address → bounding box → routes → chosen route's stops → businesses
//! near each stop. The routes, stops and POI stages are each cached as a
//! single unit.

mod discovery;

pub use discovery::{DiscoveryPipeline, StopResult, parse_stop_results};
