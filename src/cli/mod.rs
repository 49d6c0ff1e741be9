//! Command-line interface for fridgemate.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **recommend**: Rank recipes for the contents of a fridge inventory file
//! - **search**: Run a manual recipe search
//! - **score**: Break down how well one recipe matches an inventory
//! - **catalog**: List, show, or export recipes from the catalog
//!
//! ## Usage
//!
//! ```text
//! # Recommend recipes from the embedded catalog
//! fridgemate recommend fridge.tsv
//!
//! # Read the inventory from stdin, ask TheMealDB, JSON output for scripting
//! cat fridge.json | fridgemate recommend - --source mealdb --format json
//!
//! # Quick vegetarian ideas for "pasta"
//! fridgemate search pasta --filter veggie
//!
//! # Why does a recipe rank where it does?
//! fridgemate score fridge.tsv 52982
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::mealdb::{MealDbClient, DEFAULT_MEALDB_URL};
use crate::catalog::source::{LookupError, RecipeSource};
use crate::catalog::store::RecipeCatalog;
use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;
use crate::parsing::{self, InventoryFormat};

pub mod catalog;
pub mod recommend;
pub mod score;
pub mod search;

#[derive(Parser)]
#[command(name = "fridgemate")]
#[command(version)]
#[command(about = "Recommend recipes from what is already in your fridge")]
#[command(
    long_about = "fridgemate matches the ingredients in your fridge against a recipe catalog and ranks recipes by how many of their ingredients you already have.\n\nRecipes come from the embedded catalog, a catalog file, or TheMealDB."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend recipes for a fridge inventory
    Recommend(recommend::RecommendArgs),

    /// Search recipes by title
    Search(search::SearchArgs),

    /// Show the ingredient-by-ingredient match of one recipe
    Score(score::ScoreArgs),

    /// Inspect the recipe catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Where recipes are looked up
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// Embedded catalog, or the file given with --catalog
    #[default]
    Catalog,
    /// TheMealDB web API
    Mealdb,
}

/// Recipe source options shared by the lookup commands
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Recipe source
    #[arg(long, default_value = "catalog")]
    pub source: SourceKind,

    /// Path to custom catalog file (with --source catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// TheMealDB API base URL (with --source mealdb)
    #[arg(long, env = "FRIDGEMATE_MEALDB_URL", default_value = DEFAULT_MEALDB_URL)]
    pub mealdb_url: String,
}

impl SourceArgs {
    /// Construct the selected source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the HTTP client
    /// cannot be built.
    pub fn build(&self) -> anyhow::Result<CliSource> {
        match self.source {
            SourceKind::Catalog => Ok(CliSource::Catalog(load_catalog(self.catalog.as_deref())?)),
            SourceKind::Mealdb => Ok(CliSource::MealDb(MealDbClient::with_base_url(
                self.mealdb_url.as_str(),
            )?)),
        }
    }
}

/// The recipe source chosen on the command line
#[derive(Debug, Clone)]
pub enum CliSource {
    Catalog(RecipeCatalog),
    MealDb(MealDbClient),
}

impl RecipeSource for CliSource {
    async fn fetch_by_ingredient(&self, name: &str) -> Result<Vec<Recipe>, LookupError> {
        match self {
            Self::Catalog(catalog) => catalog.fetch_by_ingredient(name).await,
            Self::MealDb(client) => client.fetch_by_ingredient(name).await,
        }
    }

    async fn search_by_term(&self, term: &str) -> Result<Vec<Recipe>, LookupError> {
        match self {
            Self::Catalog(catalog) => catalog.search_by_term(term).await,
            Self::MealDb(client) => client.search_by_term(term).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Catalog(catalog) => catalog.name(),
            Self::MealDb(client) => client.name(),
        }
    }
}

/// Load a catalog file, or the embedded catalog when no path is given
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<RecipeCatalog> {
    let catalog = if let Some(path) = path {
        RecipeCatalog::load_from_file(path)?
    } else {
        RecipeCatalog::load_embedded()?
    };
    tracing::debug!(recipes = catalog.len(), "Loaded recipe catalog");
    Ok(catalog)
}

/// Read an inventory from a file, or from stdin when the path is `-`
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub fn read_inventory(path: &Path) -> anyhow::Result<Vec<InventoryItem>> {
    // Stdin has no extension, so detect the format from content
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        let format = InventoryFormat::detect(&buffer);
        return Ok(parsing::parse_inventory_text(&buffer, format)?);
    }
    Ok(parsing::parse_inventory_file(path)?)
}

/// Shorten text to at most `max_len` characters, marking the cut
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        // Leave room for the ellipsis
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Short tags for the quick filters a recipe passes
pub(crate) fn recipe_flags(recipe: &Recipe) -> String {
    let mut flags = Vec::new();
    if recipe.is_fast() {
        flags.push("fast");
    }
    if recipe.is_vegetarian() {
        flags.push("veggie");
    }
    flags.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Beef Stew", 20), "Beef Stew");
        assert_eq!(truncate("Lemon Garlic Chicken with Rice", 12), "Lemon Gar...");
    }

    #[test]
    fn test_recipe_flags() {
        let quick_veg = Recipe::new("1", "Veggie Wrap").with_times(5, 5);
        assert_eq!(recipe_flags(&quick_veg), "fast,veggie");
        let slow = Recipe::new("2", "Beef Stew").with_times(20, 150);
        assert_eq!(recipe_flags(&slow), "");
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from([
            "fridgemate",
            "recommend",
            "fridge.tsv",
            "-n",
            "3",
            "--tie-break",
            "fewest-missing",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Recommend(args) => {
                assert_eq!(args.max_recipes, 3);
                assert_eq!(args.source.source, SourceKind::Catalog);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_source_args_build_catalog() {
        let args = SourceArgs {
            source: SourceKind::Catalog,
            catalog: None,
            mealdb_url: DEFAULT_MEALDB_URL.to_string(),
        };
        let source = args.build().unwrap();
        assert_eq!(source.name(), "catalog");
    }
}
