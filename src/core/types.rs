use serde::{Deserialize, Serialize};

/// Unique identifier for a recipe across all sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum total time (prep + cook) for a recipe to count as fast
pub const FAST_MAX_MINUTES: u32 = 30;

/// Case-insensitive token marking a recipe as vegetarian in its title or description.
/// Matches "Vegetarian", "Vegan" and "Veggie".
pub const VEGETARIAN_MARKER: &str = "veg";

/// Categorical filter selecting which recipes are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RecipeFilter {
    /// Every recipe in the pool
    #[default]
    All,
    /// Total time at most [`FAST_MAX_MINUTES`]
    Fast,
    /// Title or description carries the vegetarian marker
    Veggie,
    /// Only the ranked "cook with what you have" list
    Fridge,
}

impl std::fmt::Display for RecipeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Fast => write!(f, "fast"),
            Self::Veggie => write!(f, "veggie"),
            Self::Fridge => write!(f, "fridge"),
        }
    }
}

/// Secondary ordering applied to recipes with equal matching counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep pool order (stable sort)
    #[default]
    PoolOrder,
    /// Fewer missing ingredients first, then pool order
    FewestMissing,
    /// Case-insensitive title, then pool order
    Title,
}

/// Where a recipe pool came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolOrigin {
    /// Fan-out over the inventory (or the fallback term when it was empty)
    Inventory,
    /// A single manual search term
    Search(String),
}

impl std::fmt::Display for PoolOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inventory => write!(f, "inventory"),
            Self::Search(term) => write!(f, "search '{term}'"),
        }
    }
}
