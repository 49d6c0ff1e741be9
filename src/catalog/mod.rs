//! Recipe sources.
//!
//! Every source implements [`RecipeSource`] and hands the matching engine
//! recipes already normalized to [`crate::core::recipe::Recipe`]:
//!
//! - [`RecipeCatalog`]: an in-memory catalog. An embedded catalog is compiled
//!   into the binary, and custom catalogs can be loaded from JSON files.
//! - [`MealDbClient`]: the public TheMealDB API over HTTP.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fridgemate::catalog::store::RecipeCatalog;
//! use fridgemate::core::types::RecipeId;
//!
//! // Load embedded catalog
//! let catalog = RecipeCatalog::load_embedded().unwrap();
//!
//! for recipe in &catalog.recipes {
//!     println!("{} {}", recipe.id, recipe.title);
//! }
//!
//! let carbonara = catalog.get(&RecipeId::new("52982"));
//! ```
//!
//! [`RecipeSource`]: source::RecipeSource
//! [`RecipeCatalog`]: store::RecipeCatalog
//! [`MealDbClient`]: mealdb::MealDbClient

pub mod mealdb;
pub mod source;
pub mod store;
