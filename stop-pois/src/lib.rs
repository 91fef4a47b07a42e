//! Walkable points of interest along a transit route.
//!
//! Resolves a home address, picks a nearby transit route, and finds the
//! businesses within walking distance of each of its stops, reporting the
//! ones that serve food. Every provider stage is cached on disk.

pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod pipeline;
pub mod poi;
pub mod report;
pub mod taxonomy;
pub mod transit;
