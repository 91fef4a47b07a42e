//! Business search response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// A business as returned by the search provider.
///
/// Fields the pipeline does not use are kept in `extra` so a cached result
/// holds the full provider record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub rating: f64,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Business {
    /// Create a business with no extra fields.
    pub fn new(name: impl Into<String>, rating: f64, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            rating,
            categories: aliases.iter().map(|a| CategoryRef::new(*a)).collect(),
            extra: Map::new(),
        }
    }

    /// Category aliases, in provider order.
    pub fn category_aliases(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.alias.as_str())
    }
}

/// A category tag on a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CategoryRef {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            title: None,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchPage {
    /// Total matches the provider claims to have (uncapped).
    pub total: usize,
    pub businesses: Vec<Business>,
}

/// Parse a raw search response.
pub fn parse_search_page(json: &str) -> Result<SearchPage, PipelineError> {
    serde_json::from_str(json).map_err(|e| {
        PipelineError::provider("business search", format!("invalid search response: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "total": 2,
        "businesses": [
            {
                "id": "abc",
                "name": "Sushi Place",
                "rating": 4.5,
                "price": "$$",
                "categories": [{"alias": "sushi", "title": "Sushi Bars"}],
                "coordinates": {"latitude": 34.05, "longitude": -118.26}
            },
            {
                "id": "def",
                "name": "Corner Shop",
                "rating": 4.0,
                "categories": [{"alias": "shopping", "title": "Shopping"}]
            }
        ],
        "region": {"center": {"latitude": 34.0, "longitude": -118.4}}
    }"#;

    #[test]
    fn parses_page() {
        let page = parse_search_page(PAGE).unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.businesses.len(), 2);
        assert_eq!(page.businesses[0].name, "Sushi Place");
        assert_eq!(page.businesses[0].rating, 4.5);
        assert_eq!(
            page.businesses[0].category_aliases().collect::<Vec<_>>(),
            vec!["sushi"]
        );
    }

    #[test]
    fn unknown_fields_survive_reserialization() {
        let page = parse_search_page(PAGE).unwrap();
        let business = &page.businesses[0];

        assert_eq!(business.extra["id"], "abc");
        assert_eq!(business.extra["price"], "$$");

        let json = serde_json::to_value(business).unwrap();
        assert_eq!(json["coordinates"]["latitude"], 34.05);
        assert_eq!(json["categories"][0]["title"], "Sushi Bars");

        let back: Business = serde_json::from_value(json).unwrap();
        assert_eq!(&back, business);
    }

    #[test]
    fn missing_total_is_provider_error() {
        let err = parse_search_page(r#"{"businesses": []}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Provider { .. }));
    }

    #[test]
    fn business_without_categories_defaults_to_empty() {
        let page = parse_search_page(r#"{"total": 1, "businesses": [{"name": "X", "rating": 3.5}]}"#)
            .unwrap();
        assert!(page.businesses[0].categories.is_empty());
    }
}
