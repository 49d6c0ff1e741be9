//! # fridgemate
//!
//! A library for recommending recipes from what is already in the fridge.
//!
//! Given the user's fridge inventory, `fridgemate` builds a pool of candidate
//! recipes by looking up each ingredient in a recipe source, scores every
//! recipe by how many of its ingredients are on hand, and ranks the pool so the
//! recipes needing the fewest extra purchases come first. A filter/search view
//! narrows the result to quick recipes, vegetarian recipes, or the ranked
//! "cook with what you have" list.
//!
//! ## Features
//!
//! - **Tolerant matching**: Case-insensitive substring match in both directions
//! - **Concurrent pool building**: One lookup per distinct ingredient; failures
//!   contribute nothing instead of failing the whole build
//! - **Deterministic ranking**: Stable order with a configurable tie-break
//! - **Fallback suggestions**: An empty fridge still gets "Pasta" recipes
//! - **Last-writer-wins sessions**: Overlapping fetches never clobber newer results
//!
//! ## Example
//!
//! ```rust,no_run
//! use fridgemate::{InventoryItem, PoolBuilder, RankingEngine, RecipeCatalog};
//!
//! # async fn demo() {
//! // Load the embedded recipe catalog
//! let catalog = RecipeCatalog::load_embedded().unwrap();
//!
//! let inventory = vec![InventoryItem::named("Chicken"), InventoryItem::named("Rice")];
//!
//! // Fan out one lookup per ingredient and merge the results
//! let outcome = PoolBuilder::new(catalog).build_pool(&inventory).await;
//!
//! // Rank by ingredients already in the fridge
//! for ranked in RankingEngine::new().rank(&outcome.recipes, &inventory) {
//!     println!("{}: {} of {}", ranked.recipe.title, ranked.score.matching_count, ranked.score.total());
//! }
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Recipe sources (embedded catalog, TheMealDB)
//! - [`core`]: Core data types for inventory items and recipes
//! - [`matching`]: Ingredient matching, scoring, ranking and pool building
//! - [`session`]: Filter/search view and session state
//! - [`parsing`]: Inventory file parsers
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::source::{LookupError, RecipeSource};
pub use catalog::store::RecipeCatalog;
pub use core::inventory::InventoryItem;
pub use core::recipe::{Recipe, RecipeIngredient};
pub use core::types::*;
pub use matching::engine::{MatchingConfig, RankedRecipe, RankingEngine};
pub use matching::pool::{PoolBuilder, PoolConfig, PoolOutcome};
pub use matching::scoring::RecipeScore;
pub use session::RecipeSession;
