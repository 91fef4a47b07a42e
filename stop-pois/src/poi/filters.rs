//! Static business search filters.

use crate::geo::{GeoPoint, miles_to_meters};

/// Fixed query parameters and paging policy for business search.
#[derive(Debug, Clone)]
pub struct SearchFilters {
    /// Comma-separated category allowlist.
    pub categories: String,

    /// Businesses requested per page.
    pub page_size: usize,

    /// Comma-separated price tiers.
    pub price: String,

    /// Provider sort order.
    pub sort_by: String,

    /// A page containing any business rated below this ends paging.
    pub min_rating: f64,

    /// The provider never serves more than this many results per query.
    pub max_total: usize,
}

impl SearchFilters {
    /// Build the query for businesses within `radius_miles` of `location`.
    pub fn query(&self, location: GeoPoint, radius_miles: f64) -> SearchQuery {
        SearchQuery {
            location,
            radius_meters: miles_to_meters(radius_miles),
            categories: self.categories.clone(),
            price: self.price.clone(),
            sort_by: self.sort_by.clone(),
        }
    }
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            categories: "restaurants,food".to_string(),
            page_size: 50,
            price: "1,2,3,4".to_string(),
            sort_by: "best_match".to_string(),
            min_rating: 3.0,
            max_total: 1000,
        }
    }
}

/// Query parameters shared by every page of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub location: GeoPoint,
    pub radius_meters: u32,
    pub categories: String,
    pub price: String,
    pub sort_by: String,
}
