use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::source::{LookupError, RecipeSource};
use crate::core::recipe::{contains_ignore_case, Recipe};
use crate::core::types::RecipeId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub recipes: Vec<Recipe>,
}

/// An in-memory recipe catalog, usable as an offline [`RecipeSource`]
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    /// All recipes, in catalog order
    pub recipes: Vec<Recipe>,

    /// Index: recipe ID -> index in recipes vec
    id_to_index: HashMap<RecipeId, usize>,
}

impl RecipeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/recipes.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        // Read and parse
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                expected = CATALOG_VERSION,
                found = %data.version,
                "Catalog version mismatch"
            );
        }

        // Build catalog with index
        Ok(Self::from_recipes(data.recipes))
    }

    /// Build a catalog from recipes; later duplicates of an ID are dropped
    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let mut catalog = Self::new();
        for recipe in recipes {
            catalog.add_recipe(recipe);
        }
        catalog
    }

    /// Add a recipe, returning false if its ID is already present
    pub fn add_recipe(&mut self, recipe: Recipe) -> bool {
        if self.id_to_index.contains_key(&recipe.id) {
            tracing::debug!(id = %recipe.id, "Skipping duplicate recipe in catalog");
            return false;
        }
        // Index by ID
        self.id_to_index.insert(recipe.id.clone(), self.recipes.len());
        self.recipes.push(recipe);
        true
    }

    /// Get a recipe by ID
    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.id_to_index.get(id).map(|&idx| &self.recipes[idx])
    }

    /// Recipes with an ingredient whose name contains `name`, case-insensitively
    pub fn with_ingredient(&self, name: &str) -> Vec<Recipe> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        self.recipes
            .iter()
            .filter(|r| r.ingredient_names().any(|n| contains_ignore_case(n, name)))
            .cloned()
            .collect()
    }

    /// Recipes whose title contains `term`; a blank term returns everything
    pub fn matching_title(&self, term: &str) -> Vec<Recipe> {
        let term = term.trim();
        self.recipes
            .iter()
            .filter(|r| term.is_empty() || contains_ignore_case(&r.title, term))
            .cloned()
            .collect()
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        // Stamp the export with the current version and time
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            recipes: self.recipes.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of recipes in catalog
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeSource for RecipeCatalog {
    async fn fetch_by_ingredient(&self, name: &str) -> Result<Vec<Recipe>, LookupError> {
        Ok(self.with_ingredient(name))
    }

    async fn search_by_term(&self, term: &str) -> Result<Vec<Recipe>, LookupError> {
        Ok(self.matching_title(term))
    }

    fn name(&self) -> &str {
        "catalog"
    }
}
