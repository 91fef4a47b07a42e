//! Geographic primitives.
//!
//! Points are plain latitude/longitude pairs in degrees. Bounding boxes
//! are a small-angle planar approximation, good for a radius of a few
//! miles away from the poles and the antimeridian.

mod bbox;
mod point;

pub use bbox::{BoundingBox, EARTH_RADIUS_MILES, METERS_PER_MILE, miles_to_meters};
pub use point::{GeoPoint, InvalidGeoPoint};
