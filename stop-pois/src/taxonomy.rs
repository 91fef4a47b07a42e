//! Business category taxonomy.
//!
//! The search provider publishes a flat list of categories, each naming its
//! immediate parents. Classification only looks one hop up that graph: a
//! category counts as belonging to a target if it *is* the target or lists
//! the target as a direct parent. Grandparents are not consulted.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::PipelineError;

/// Category list shipped with the crate.
const BUNDLED_CATEGORIES: &str = include_str!("../data/categories.json");

/// Aliases a business must match (one hop) to be reported as food.
pub const FOOD_ALIASES: [&str; 2] = ["food", "restaurants"];

/// One entry of the provider's category list.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub alias: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

/// Mapping from category alias to its immediate parent aliases.
#[derive(Debug, Clone, Default)]
pub struct CategoryTaxonomy {
    parents: HashMap<String, HashSet<String>>,
}

impl CategoryTaxonomy {
    /// Build the alias → parents mapping from a category list.
    ///
    /// No transitive closure is computed. A repeated alias merges its
    /// parent sets.
    pub fn from_records(records: impl IntoIterator<Item = CategoryRecord>) -> Self {
        let mut parents: HashMap<String, HashSet<String>> = HashMap::new();
        for record in records {
            parents
                .entry(record.alias)
                .or_default()
                .extend(record.parents);
        }
        Self { parents }
    }

    /// Parse a JSON category list.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let records: Vec<CategoryRecord> = serde_json::from_str(json).map_err(|e| {
            PipelineError::Configuration(format!("invalid category list: {e}"))
        })?;
        Ok(Self::from_records(records))
    }

    /// Load a JSON category list from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Configuration(format!(
                "failed to read category list {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    /// The category list bundled with the crate.
    pub fn bundled() -> Result<Self, PipelineError> {
        Self::from_json(BUNDLED_CATEGORIES)
    }

    /// Immediate parents of `alias`, if the alias is known.
    pub fn parents_of(&self, alias: &str) -> Option<&HashSet<String>> {
        self.parents.get(alias)
    }

    /// Whether any of `categories` is a target, or has a target as an
    /// immediate parent.
    ///
    /// Unknown aliases only match a target with the same name.
    pub fn is_descendant_of_any<'a, I, T>(&self, categories: I, targets: &[T]) -> bool
    where
        I: IntoIterator<Item = &'a str>,
        T: AsRef<str>,
    {
        categories.into_iter().any(|alias| {
            targets.iter().any(|target| {
                let target = target.as_ref();
                alias == target
                    || self
                        .parents
                        .get(alias)
                        .is_some_and(|parents| parents.contains(target))
            })
        })
    }

    /// Whether a category list classifies as food.
    pub fn is_food<'a>(&self, categories: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_descendant_of_any(categories, &FOOD_ALIASES)
    }

    /// Number of known categories.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if no categories are known.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
