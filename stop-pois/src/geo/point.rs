//! Latitude/longitude points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when coordinates fall outside the valid ranges.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({latitude}, {longitude}): {reason}")]
pub struct InvalidGeoPoint {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A point on the Earth's surface, in degrees.
///
/// [`GeoPoint::new`] does not check ranges: bounding-box corners computed
/// near the poles may legitimately fall outside them. Coordinates coming
/// from providers go through [`GeoPoint::validated`].
///
/// # Examples
///
/// ```
/// use stop_pois::geo::GeoPoint;
///
/// let p = GeoPoint::validated(34.0, -118.4).unwrap();
/// assert_eq!(p.latitude, 34.0);
///
/// assert!(GeoPoint::validated(91.0, 0.0).is_err());
/// assert!(GeoPoint::validated(0.0, -180.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting out-of-range or non-finite coordinates.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, InvalidGeoPoint> {
        let invalid = |reason| InvalidGeoPoint {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Whether both coordinates are within their valid ranges.
    pub fn is_valid(&self) -> bool {
        Self::validated(self.latitude, self.longitude).is_ok()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
