use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_catalog, recipe_flags, truncate, OutputFormat};
use crate::core::recipe::Recipe;
use crate::core::types::{RecipeFilter, RecipeId};
use crate::session::view::visible_list;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List recipes in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list recipes passing this filter (fridge lists nothing here)
        #[arg(long, default_value = "all")]
        filter: RecipeFilter,

        /// Only list recipes whose title contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show details of a specific recipe
    Show {
        /// Recipe ID
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute a catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the recipe is unknown,
/// or the export cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            filter,
            search,
        } => run_list(catalog, filter, search.as_deref(), format, verbose),
        CatalogCommands::Show { id, catalog } => run_show(&id, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    filter: RecipeFilter,
    search: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} recipes", catalog.len());
    }

    // Same composition as the recipe view; no inventory, so nothing is ranked
    let filtered = visible_list(&catalog.recipes, &[], filter, search.unwrap_or(""));

    match format {
        OutputFormat::Text => {
            // Calculate dynamic column widths
            let id_width = filtered
                .iter()
                .map(|r| r.id.as_str().len())
                .max()
                .unwrap_or(2)
                .max(2);
            let title_width = filtered
                .iter()
                .map(|r| r.title.chars().count().min(35))
                .max()
                .unwrap_or(5)
                .max(5);

            let total_width = id_width + title_width + 6 + 12 + 14;

            println!("Recipe Catalog ({} recipes)\n", filtered.len());
            println!(
                "{:<id_w$} {:<title_w$} {:>6} {:>12}  Tags",
                "ID",
                "Title",
                "Mins",
                "Ingredients",
                id_w = id_width,
                title_w = title_width
            );
            println!("{}", "-".repeat(total_width));

            for r in &filtered {
                println!(
                    "{:<id_w$} {:<title_w$} {:>6} {:>12}  {}",
                    r.id.as_str(),
                    truncate(&r.title, title_width),
                    r.total_minutes(),
                    r.ingredients.len(),
                    recipe_flags(r),
                    id_w = id_width,
                    title_w = title_width
                );
                if verbose {
                    if let Some(desc) = &r.description {
                        println!("  └─ {desc}");
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = filtered
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id,
                        "title": r.title,
                        "description": r.description,
                        "total_minutes": r.total_minutes(),
                        "ingredient_count": r.ingredients.len(),
                        "fast": r.is_fast(),
                        "vegetarian": r.is_vegetarian(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            // Header
            println!("id\ttitle\tdescription\ttotal_minutes\tingredient_count\tfast\tvegetarian");
            for r in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    r.id,
                    r.title,
                    r.description.as_deref().unwrap_or(""),
                    r.total_minutes(),
                    r.ingredients.len(),
                    r.is_fast(),
                    r.is_vegetarian()
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let recipe = catalog
        .get(&RecipeId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Recipe '{}' not found", id))?;

    match format {
        OutputFormat::Text => print_text_recipe(recipe),
        // Full recipe as stored
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        OutputFormat::Tsv => {
            println!("name\tquantity\tunit");
            for ingredient in &recipe.ingredients {
                println!(
                    "{}\t{}\t{}",
                    ingredient.name.as_deref().unwrap_or(""),
                    ingredient.quantity.as_deref().unwrap_or(""),
                    ingredient.unit.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

fn print_text_recipe(recipe: &Recipe) {
    println!("Recipe: {}\n", recipe.title);
    println!("ID:      {}", recipe.id);
    println!(
        "Time:    {} min ({} prep, {} cook)",
        recipe.total_minutes(),
        recipe.prep_time_minutes,
        recipe.cook_time_minutes
    );
    let flags = recipe_flags(recipe);
    if !flags.is_empty() {
        println!("Tags:    {flags}");
    }

    if let Some(desc) = &recipe.description {
        println!("\nDescription: {desc}");
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        let amount = [ingredient.quantity.as_deref(), ingredient.unit.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {:<10} {}",
            amount,
            ingredient.name.as_deref().unwrap_or("-")
        );
    }

    if !recipe.instructions.is_empty() {
        println!("\nInstructions:");
        for (i, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {step}", i + 1);
        }
    }

    if let Some(url) = &recipe.image_url {
        println!("\nImage: {url}");
    }
}

fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!("Exported {} recipes to {}", catalog.len(), output.display());

    Ok(())
}
