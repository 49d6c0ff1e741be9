//! Score command - explain how one recipe matches an inventory.
//!
//! Looks the recipe up in the catalog by id and reports, ingredient by
//! ingredient, which fridge item satisfied it.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, read_inventory, OutputFormat};
use crate::core::recipe::Recipe;
use crate::core::types::RecipeId;
use crate::matching::scoring::{explain, IngredientMatch, RecipeScore};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Inventory file (JSON, TSV or CSV), or - for stdin
    #[arg(required = true)]
    pub inventory: PathBuf,

    /// Recipe ID in the catalog
    #[arg(required = true)]
    pub recipe_id: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if inputs cannot be read or the recipe is not in the catalog.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inventory = read_inventory(&args.inventory)?;
    let catalog = load_catalog(args.catalog.as_deref())?;

    if verbose {
        eprintln!(
            "Scoring against {} inventory items, catalog has {} recipes",
            inventory.len(),
            catalog.len()
        );
    }

    // Find the recipe
    let recipe = catalog
        .get(&RecipeId::new(args.recipe_id.as_str()))
        .ok_or_else(|| anyhow::anyhow!("Recipe '{}' not found", args.recipe_id))?;

    // Score and per-ingredient breakdown use the same matching rule
    let score = RecipeScore::calculate(recipe, &inventory);
    let breakdown = explain(recipe, &inventory);

    match format {
        OutputFormat::Text => print_text_result(recipe, score, &breakdown),
        OutputFormat::Json => print_json_result(recipe, score, &breakdown)?,
        OutputFormat::Tsv => print_tsv_result(&breakdown),
    }

    Ok(())
}

fn print_text_result(recipe: &Recipe, score: RecipeScore, breakdown: &[IngredientMatch]) {
    println!("\n{} ({})", recipe.title, recipe.id);
    println!(
        "\n   Have {}/{} ingredients ({:.0}%), missing {}",
        score.matching_count,
        score.total(),
        score.coverage() * 100.0,
        score.missing_count
    );

    if breakdown.is_empty() {
        println!("   (recipe lists no ingredients)");
        return;
    }

    println!();
    for m in breakdown {
        let name = if m.ingredient.is_empty() { "<unnamed>" } else { m.ingredient.as_str() };
        match &m.matched_by {
            Some(item) => println!("   [x] {name}  <- {item}"),
            None => println!("   [ ] {name}"),
        }
    }
}

fn print_json_result(
    recipe: &Recipe,
    score: RecipeScore,
    breakdown: &[IngredientMatch],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "id": recipe.id,
        "title": recipe.title,
        "score": score,
        "coverage": score.coverage(),
        "ingredients": breakdown,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_result(breakdown: &[IngredientMatch]) {
    println!("ingredient\tpresent\tmatched_by");
    for m in breakdown {
        println!(
            "{}\t{}\t{}",
            m.ingredient,
            m.matched_by.is_some(),
            m.matched_by.as_deref().unwrap_or("")
        );
    }
}
