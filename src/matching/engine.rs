use serde::Serialize;

use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;
use crate::core::types::TieBreak;
use crate::matching::matcher::InventoryIndex;
use crate::matching::scoring::RecipeScore;

/// A recipe paired with its score for one ranking pass
#[derive(Debug, Clone, Serialize)]
pub struct RankedRecipe {
    /// The ranked recipe
    pub recipe: Recipe,

    /// Match/missing counts against the inventory the ranking was computed from
    pub score: RecipeScore,
}

/// Configuration for the ranking engine
#[derive(Debug, Clone, Default)]
pub struct MatchingConfig {
    /// Secondary order for equal matching counts
    pub tie_break: TieBreak,
    /// Keep at most this many ranked recipes
    pub limit: Option<usize>,
}

/// Scores a recipe pool against the inventory and orders it by relevance
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: MatchingConfig,
}

impl RankingEngine {
    /// Create a ranking engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MatchingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank the pool: recipes with at least one matched ingredient,
    /// most matches first.
    ///
    /// Equal matching counts are ordered by the configured [`TieBreak`]; every
    /// strategy falls back to pool order, so the output is deterministic for a
    /// given pool and inventory. Empty pool or empty inventory gives an empty list.
    #[must_use]
    pub fn rank(&self, pool: &[Recipe], inventory: &[InventoryItem]) -> Vec<RankedRecipe> {
        // Build index once for the whole pool
        let index = InventoryIndex::new(inventory);
        if pool.is_empty() || index.is_empty() {
            return Vec::new();
        }

        // Score every recipe, keeping only those with something on hand
        let mut ranked: Vec<RankedRecipe> = pool
            .iter()
            .map(|recipe| RankedRecipe {
                recipe: recipe.clone(),
                score: RecipeScore::calculate_indexed(recipe, &index),
            })
            .filter(|r| r.score.matching_count > 0)
            .collect();

        // sort_by is stable, which keeps pool order as the final tie-break
        match self.config.tie_break {
            TieBreak::PoolOrder => {
                ranked.sort_by(|a, b| b.score.matching_count.cmp(&a.score.matching_count));
            }
            TieBreak::FewestMissing => ranked.sort_by(|a, b| {
                b.score
                    .matching_count
                    .cmp(&a.score.matching_count)
                    .then(a.score.missing_count.cmp(&b.score.missing_count))
            }),
            TieBreak::Title => ranked.sort_by(|a, b| {
                b.score
                    .matching_count
                    .cmp(&a.score.matching_count)
                    .then_with(|| {
                        a.recipe
                            .title
                            .to_lowercase()
                            .cmp(&b.recipe.title.to_lowercase())
                    })
            }),
        }

        // Apply limit after sorting
        if let Some(limit) = self.config.limit {
            ranked.truncate(limit);
        }

        tracing::debug!(
            pool = pool.len(),
            ranked = ranked.len(),
            "Ranked recipe pool against inventory"
        );
        ranked
    }
}

/// Rank with the default configuration
#[must_use]
pub fn rank(pool: &[Recipe], inventory: &[InventoryItem]) -> Vec<RankedRecipe> {
    RankingEngine::new().rank(pool, inventory)
}
