//! Run configuration.
//!
//! The route filter and walk radius are fixed; the home address and the
//! business search credential come from the environment.

use std::fmt;
use std::path::PathBuf;

use crate::error::PipelineError;
use crate::taxonomy::CategoryTaxonomy;

/// Routes whose name starts with this are considered.
pub const DEFAULT_ROUTE_PREFIX: &str = "Metro Expo";

/// How far from a stop counts as walkable, in miles.
pub const DEFAULT_WALK_RADIUS_MILES: f64 = 0.5;

/// Where cached stages are kept.
pub const DEFAULT_CACHE_DIR: &str = "cache";

pub const HOME_ADDRESS_VAR: &str = "STOP_POIS_HOME_ADDRESS";
pub const API_KEY_VAR: &str = "YELP_API_KEY";
pub const CACHE_DIR_VAR: &str = "STOP_POIS_CACHE_DIR";
pub const CATEGORIES_VAR: &str = "STOP_POIS_CATEGORIES";

/// Everything one run needs.
#[derive(Clone)]
pub struct AppConfig {
    /// Address the search is centred on.
    pub home_address: String,

    /// Prefix selecting the route of interest.
    pub route_prefix: String,

    /// Walk radius around home and around each stop (miles).
    pub walk_radius_miles: f64,

    /// Business search credential.
    pub api_key: String,

    /// Directory holding cached stages.
    pub cache_dir: PathBuf,

    /// Category list to classify with; the bundled list if `None`.
    pub categories_path: Option<PathBuf>,
}

impl AppConfig {
    /// Create a config with the fixed route filter, radius and cache
    /// location.
    pub fn new(home_address: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            home_address: home_address.into(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            walk_radius_miles: DEFAULT_WALK_RADIUS_MILES,
            api_key: api_key.into(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            categories_path: None,
        }
    }

    /// Read the config from process environment variables.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the config through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PipelineError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| PipelineError::Configuration(format!("{name} is not set")))
        };

        let mut config = Self::new(require(HOME_ADDRESS_VAR)?, require(API_KEY_VAR)?);
        if let Some(dir) = get(CACHE_DIR_VAR) {
            config.cache_dir = PathBuf::from(dir);
        }
        config.categories_path = get(CATEGORIES_VAR).map(PathBuf::from);

        Ok(config)
    }

    /// Load the category taxonomy this config points at.
    pub fn taxonomy(&self) -> Result<CategoryTaxonomy, PipelineError> {
        match &self.categories_path {
            Some(path) => CategoryTaxonomy::load(path),
            None => CategoryTaxonomy::bundled(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("home_address", &self.home_address)
            .field("route_prefix", &self.route_prefix)
            .field("walk_radius_miles", &self.walk_radius_miles)
            .field("api_key", &"<redacted>")
            .field("cache_dir", &self.cache_dir)
            .field("categories_path", &self.categories_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::new("123 Main St", "key");

        assert_eq!(config.route_prefix, "Metro Expo");
        assert_eq!(config.walk_radius_miles, 0.5);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
        assert!(config.categories_path.is_none());
    }

    #[test]
    fn reads_required_and_optional_vars() {
        let config = AppConfig::from_lookup(lookup(&[
            (HOME_ADDRESS_VAR, "123 Main St"),
            (API_KEY_VAR, "key"),
            (CACHE_DIR_VAR, "/tmp/pois"),
            (CATEGORIES_VAR, "/etc/categories.json"),
        ]))
        .unwrap();

        assert_eq!(config.home_address, "123 Main St");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/pois"));
        assert_eq!(
            config.categories_path,
            Some(PathBuf::from("/etc/categories.json"))
        );
    }

    #[test]
    fn missing_address_is_configuration_error() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_VAR, "key")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: STOP_POIS_HOME_ADDRESS is not set"
        );
    }

    #[test]
    fn blank_key_is_configuration_error() {
        let err = AppConfig::from_lookup(lookup(&[
            (HOME_ADDRESS_VAR, "123 Main St"),
            (API_KEY_VAR, "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn debug_redacts_key() {
        let config = AppConfig::new("123 Main St", "super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn taxonomy_defaults_to_bundled_list() {
        let config = AppConfig::new("123 Main St", "key");
        assert!(config.taxonomy().unwrap().is_food(["sushi"]));
    }
}
