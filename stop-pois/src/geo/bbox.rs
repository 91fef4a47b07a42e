//! Bounding boxes around a center point.

use serde::{Deserialize, Serialize};

use super::point::GeoPoint;

/// Mean Earth radius used for the degree conversions, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3960.0;

/// Meters per mile, as used for provider radius parameters.
pub const METERS_PER_MILE: f64 = 1609.0;

/// Convert a radius in miles to whole meters (truncating).
pub fn miles_to_meters(miles: f64) -> u32 {
    (miles * METERS_PER_MILE) as u32
}

/// A latitude/longitude rectangle.
///
/// `southwest.latitude <= northeast.latitude` always holds for boxes built by
/// [`BoundingBox::around`]. Longitudes are not wrap-safe: a box crossing the
/// antimeridian is not represented correctly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub southwest: GeoPoint,
    pub northeast: GeoPoint,
}

impl BoundingBox {
    /// Compute the box reaching `radius_miles` from `center` in each
    /// cardinal direction.
    ///
    /// The longitude span is widened by the local circle-of-latitude radius.
    /// As latitude approaches ±90° that radius tends to zero and the span
    /// blows up; no error is raised.
    ///
    /// # Examples
    ///
    /// ```
    /// use stop_pois::geo::{BoundingBox, EARTH_RADIUS_MILES, GeoPoint};
    ///
    /// let bbox = BoundingBox::around(GeoPoint::new(34.0, -118.4), 0.5);
    /// let half_height = (bbox.northeast.latitude - bbox.southwest.latitude) / 2.0;
    /// assert!((half_height - (0.5 / EARTH_RADIUS_MILES).to_degrees()).abs() < 1e-12);
    /// ```
    pub fn around(center: GeoPoint, radius_miles: f64) -> Self {
        let dlat = (radius_miles / EARTH_RADIUS_MILES).to_degrees();
        let local_radius = EARTH_RADIUS_MILES * center.latitude.to_radians().cos();
        let dlon = (radius_miles / local_radius).to_degrees();

        Self {
            southwest: GeoPoint::new(center.latitude - dlat, center.longitude - dlon),
            northeast: GeoPoint::new(center.latitude + dlat, center.longitude + dlon),
        }
    }

    /// Midpoint of the two corners.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.southwest.latitude + self.northeast.latitude) / 2.0,
            (self.southwest.longitude + self.northeast.longitude) / 2.0,
        )
    }

    /// Render as `west,south,east,north`, the order transit directories
    /// expect for a `bbox` query parameter.
    pub fn to_query_param(&self) -> String {
        format!(
            "{},{},{},{}",
            self.southwest.longitude,
            self.southwest.latitude,
            self.northeast.longitude,
            self.northeast.latitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn half_height_matches_radius() {
        let bbox = BoundingBox::around(GeoPoint::new(34.0, -118.4), 0.5);
        let expected = (0.5_f64 / 3960.0).to_degrees();

        assert!(close(34.0 - bbox.southwest.latitude, expected));
        assert!(close(bbox.northeast.latitude - 34.0, expected));
    }

    #[test]
    fn longitude_span_widens_with_latitude() {
        let equator = BoundingBox::around(GeoPoint::new(0.0, 10.0), 1.0);
        let north = BoundingBox::around(GeoPoint::new(60.0, 10.0), 1.0);

        let equator_width = equator.northeast.longitude - equator.southwest.longitude;
        let north_width = north.northeast.longitude - north.southwest.longitude;

        // cos(60°) = 0.5, so the span doubles
        assert!(close(north_width, equator_width * 2.0));
    }

    #[test]
    fn equator_box_is_square_in_degrees() {
        let bbox = BoundingBox::around(GeoPoint::new(0.0, 0.0), 2.0);
        let height = bbox.northeast.latitude - bbox.southwest.latitude;
        let width = bbox.northeast.longitude - bbox.southwest.longitude;
        assert!(close(height, width));
    }

    #[test]
    fn zero_radius_collapses_to_center() {
        let center = GeoPoint::new(51.5, -0.12);
        let bbox = BoundingBox::around(center, 0.0);
        assert_eq!(bbox.southwest, center);
        assert_eq!(bbox.northeast, center);
    }

    #[test]
    fn query_param_is_west_south_east_north() {
        let bbox = BoundingBox {
            southwest: GeoPoint::new(33.5, -118.5),
            northeast: GeoPoint::new(34.5, -118.25),
        };
        assert_eq!(bbox.to_query_param(), "-118.5,33.5,-118.25,34.5");
    }

    #[test]
    fn miles_to_meters_truncates() {
        assert_eq!(miles_to_meters(0.5), 804);
        assert_eq!(miles_to_meters(1.0), 1609);
        assert_eq!(miles_to_meters(0.0), 0);
    }
}
