use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::source::{LookupError, RecipeSource};
use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;

/// Term looked up when the inventory is empty, so a first run still has suggestions
pub const DEFAULT_FALLBACK_TERM: &str = "Pasta";

/// A manual search failed, as opposed to finding nothing
#[derive(Error, Debug)]
#[error("Recipe search for '{term}' failed: {source}")]
pub struct SearchError {
    pub term: String,
    #[source]
    pub source: LookupError,
}

/// Configuration for pool building
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Looked up instead of the inventory when it is empty
    pub fallback_term: String,
    /// Cap on lookups in flight at once; `None` starts every lookup together.
    /// Results come back in issue order either way.
    pub max_concurrent_lookups: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fallback_term: DEFAULT_FALLBACK_TERM.to_string(),
            max_concurrent_lookups: None,
        }
    }
}

/// Result of one pool build
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolOutcome {
    /// Deduplicated candidate recipes, in lookup issue order
    pub recipes: Vec<Recipe>,
    /// Lookups issued
    pub lookups: usize,
    /// Lookups that failed and contributed nothing
    pub failed_lookups: usize,
    /// Non-fatal message when the pool came back empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl PoolOutcome {
    fn from_results(results: Vec<(String, Result<Vec<Recipe>, LookupError>)>) -> Self {
        let lookups = results.len();
        let mut failed_lookups = 0;
        let mut batches = Vec::with_capacity(lookups);

        // Failed lookups are logged and dropped
        for (term, result) in results {
            match result {
                Ok(recipes) => {
                    tracing::debug!(term = %term, found = recipes.len(), "Lookup completed");
                    batches.push(recipes);
                }
                Err(e) => {
                    failed_lookups += 1;
                    tracing::warn!(term = %term, error = %e, "Recipe lookup failed, skipping");
                }
            }
        }

        // Flatten in issue order so the first occurrence of an ID wins
        let recipes = dedup_by_id(batches.into_iter().flatten());
        let advisory = recipes.is_empty().then(|| {
            if failed_lookups == 0 {
                "No recipes found for the ingredients in your fridge".to_string()
            } else {
                format!("No recipes found ({failed_lookups} of {lookups} lookups failed)")
            }
        });

        Self {
            recipes,
            lookups,
            failed_lookups,
            advisory,
        }
    }
}

/// Keep the first recipe seen for each ID
pub fn dedup_by_id(recipes: impl IntoIterator<Item = Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    recipes
        .into_iter()
        .filter(|recipe| seen.insert(recipe.id.clone()))
        .collect()
}

/// Distinct inventory names in inventory order.
///
/// Names are compared trimmed and case-insensitively; the first spelling wins.
/// Blank names are dropped.
#[must_use]
pub fn distinct_names(inventory: &[InventoryItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    inventory
        .iter()
        .map(|item| item.name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Builds the candidate recipe pool from a [`RecipeSource`]
pub struct PoolBuilder<S> {
    source: Arc<S>,
    config: PoolConfig,
}

impl<S> Clone for PoolBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<S: RecipeSource> PoolBuilder<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(Arc::new(source), PoolConfig::default())
    }

    pub fn with_config(source: Arc<S>, config: PoolConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Build the pool for an inventory.
    ///
    /// Issues one lookup per distinct ingredient name, all of which settle
    /// before aggregation. A failed lookup contributes nothing; it never fails
    /// the build. With no usable names, a single lookup of the fallback term
    /// is issued instead.
    pub async fn build_pool(&self, inventory: &[InventoryItem]) -> PoolOutcome {
        // One lookup per distinct name
        let names = distinct_names(inventory);

        if names.is_empty() {
            let term = self.config.fallback_term.clone();
            tracing::info!(term = %term, "Inventory is empty, using fallback search");
            let result = self.source.search_by_term(&term).await;
            return PoolOutcome::from_results(vec![(term, result)]);
        }

        tracing::debug!(
            lookups = names.len(),
            source = self.source.name(),
            "Fanning out recipe lookups"
        );

        let shared = Arc::clone(&self.source);
        let lookups = names.into_iter().map(move |name| {
            let source = Arc::clone(&shared);
            async move {
                let result = source.fetch_by_ingredient(&name).await;
                (name, result)
            }
        });

        // Both paths yield results in issue order, not completion order
        let results: Vec<(String, Result<Vec<Recipe>, LookupError>)> =
            match self.config.max_concurrent_lookups {
                None => join_all(lookups).await,
                Some(cap) => stream::iter(lookups).buffered(cap.max(1)).collect().await,
            };

        let outcome = PoolOutcome::from_results(results);
        tracing::info!(
            recipes = outcome.recipes.len(),
            lookups = outcome.lookups,
            failed = outcome.failed_lookups,
            "Built recipe pool"
        );
        outcome
    }

    /// Replace the pool with the results of one manual search term.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the lookup fails, so callers can tell
    /// "search failed" apart from "search found nothing".
    pub async fn search(&self, term: &str) -> Result<Vec<Recipe>, SearchError> {
        // Unlike build_pool, a failed lookup is reported
        let recipes = self
            .source
            .search_by_term(term)
            .await
            .map_err(|source| SearchError {
                term: term.to_string(),
                source,
            })?;
        Ok(dedup_by_id(recipes))
    }
}
