use serde::{Deserialize, Serialize};

use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;
use crate::matching::matcher::InventoryIndex;

/// Safely convert usize to f64 for percentage calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How many of a recipe's ingredients the inventory covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeScore {
    /// Ingredients found in the inventory
    pub matching_count: usize,

    /// Ingredients not found; always `total - matching_count`
    pub missing_count: usize,
}

impl RecipeScore {
    /// Score a recipe against an inventory
    #[must_use]
    pub fn calculate(recipe: &Recipe, inventory: &[InventoryItem]) -> Self {
        Self::calculate_indexed(recipe, &InventoryIndex::new(inventory))
    }

    /// Score against a pre-built index, used when ranking a whole pool
    #[must_use]
    pub fn calculate_indexed(recipe: &Recipe, index: &InventoryIndex) -> Self {
        // Nameless ingredients count toward the total but never match
        let total = recipe.ingredients.len();
        let matching_count = recipe
            .ingredients
            .iter()
            .filter(|ingredient| index.contains(ingredient.name.as_deref()))
            .count();

        Self {
            matching_count,
            missing_count: total.saturating_sub(matching_count),
        }
    }

    /// Total ingredient count the score was computed over
    #[must_use]
    pub fn total(&self) -> usize {
        self.matching_count + self.missing_count
    }

    /// Fraction of ingredients already in the fridge (0.0 for no ingredients)
    #[must_use]
    pub fn coverage(&self) -> f64 {
        // Avoid 0/0 for recipes without ingredients
        if self.total() == 0 {
            0.0
        } else {
            count_to_f64(self.matching_count) / count_to_f64(self.total())
        }
    }
}

/// Score one recipe; see [`RecipeScore::calculate`]
#[must_use]
pub fn score_recipe(recipe: &Recipe, inventory: &[InventoryItem]) -> RecipeScore {
    RecipeScore::calculate(recipe, inventory)
}

/// Per-ingredient outcome, for explaining a score
#[derive(Debug, Clone, Serialize)]
pub struct IngredientMatch {
    /// Ingredient name as written in the recipe (empty when the source sent none)
    pub ingredient: String,

    /// Lowercased inventory name that satisfied it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<String>,
}

/// Break a score down ingredient by ingredient
#[must_use]
pub fn explain(recipe: &Recipe, inventory: &[InventoryItem]) -> Vec<IngredientMatch> {
    let index = InventoryIndex::new(inventory);
    recipe
        .ingredients
        .iter()
        .map(|ingredient| {
            // An empty name matches nothing
            let name = ingredient.name.clone().unwrap_or_default();
            let matched_by = index.matched_by(&name).map(str::to_string);
            IngredientMatch {
                ingredient: name,
                matched_by,
            }
        })
        .collect()
}
