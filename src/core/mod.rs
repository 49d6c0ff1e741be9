//! Core data types for fridge-based recipe recommendation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`InventoryItem`]: An ingredient currently in the user's fridge
//! - [`Recipe`], [`RecipeIngredient`]: A recipe normalized from any recipe source
//! - [`RecipeId`]: Identity used for deduplication across sources
//! - [`RecipeFilter`], [`TieBreak`], [`PoolOrigin`]: View and ranking options
//!
//! ## Ingredient Names
//!
//! Ingredient names are free text and differ between the fridge and the recipe
//! sources:
//!
//! | Fridge   | Recipe source       |
//! |----------|---------------------|
//! | Tomato   | Cherry Tomatoes     |
//! | Chicken  | Chicken Breast      |
//! | Rice     | Basmati rice        |
//!
//! Matching is a case-insensitive substring test in either direction; see
//! [`crate::matching::matcher`].
//!
//! [`InventoryItem`]: inventory::InventoryItem
//! [`Recipe`]: recipe::Recipe
//! [`RecipeIngredient`]: recipe::RecipeIngredient
//! [`RecipeId`]: types::RecipeId
//! [`RecipeFilter`]: types::RecipeFilter
//! [`TieBreak`]: types::TieBreak
//! [`PoolOrigin`]: types::PoolOrigin

pub mod inventory;
pub mod recipe;
pub mod types;
