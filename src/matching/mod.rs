//! Recipe matching, scoring, ranking and pool building.
//!
//! This module provides the recommendation pipeline:
//!
//! - [`matcher`]: Is one recipe ingredient present in the inventory?
//! - [`RecipeScore`]: Matched and missing ingredient counts for one recipe
//! - [`RankingEngine`]: Scores a pool and orders it by matched ingredients
//! - [`PoolBuilder`]: Fans out lookups to a recipe source and merges the results
//!
//! ## Matching Rule
//!
//! An ingredient is present when an inventory name is a case-insensitive
//! substring of the ingredient name, or the other way around. "Tomato" in the
//! fridge satisfies "Cherry Tomatoes"; "Egg" does not satisfy "Vegetable Oil".
//!
//! ## Ranking
//!
//! Ranking keeps recipes with at least one matched ingredient, most matches
//! first. Ties follow the configured [`TieBreak`](crate::core::types::TieBreak),
//! falling back to pool order.
//!
//! ## Example
//!
//! ```rust
//! use fridgemate::core::inventory::InventoryItem;
//! use fridgemate::core::recipe::Recipe;
//! use fridgemate::matching::engine::RankingEngine;
//!
//! let inventory = vec![InventoryItem::named("Chicken"), InventoryItem::named("Rice")];
//! let pool = vec![
//!     Recipe::new("A", "Chicken Rice").with_ingredient_names(&["Chicken", "Garlic", "Rice"]),
//!     Recipe::new("B", "Beef Stew").with_ingredient_names(&["Beef", "Onion"]),
//! ];
//!
//! let ranked = RankingEngine::new().rank(&pool, &inventory);
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].score.matching_count, 2);
//! ```
//!
//! [`RecipeScore`]: scoring::RecipeScore
//! [`RankingEngine`]: engine::RankingEngine
//! [`PoolBuilder`]: pool::PoolBuilder

pub mod engine;
pub mod matcher;
pub mod pool;
pub mod scoring;
