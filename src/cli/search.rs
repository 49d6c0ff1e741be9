//! Search command - manual recipe search by title.

use std::sync::Arc;

use clap::Args;

use crate::catalog::source::RecipeSource;
use crate::cli::{recipe_flags, truncate, OutputFormat, SourceArgs};
use crate::core::recipe::Recipe;
use crate::core::types::RecipeFilter;
use crate::matching::pool::{PoolBuilder, PoolConfig};
use crate::session::RecipeSession;
use crate::utils::validation::validate_term;

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Search term (matched against recipe titles)
    #[arg(required = true)]
    pub term: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Recipe filter applied to the results
    #[arg(long, default_value = "all")]
    pub filter: RecipeFilter,

    /// Maximum number of recipes to show
    #[arg(short = 'n', long, default_value = "20")]
    pub max_recipes: usize,
}

/// Execute the search command
///
/// # Errors
///
/// Returns an error if the term is invalid, the source cannot be built, or
/// the search itself fails. Finding nothing is not an error.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Validate before any request is made
    let term = validate_term(&args.term)?;

    let source = args.source.build()?;
    if verbose {
        eprintln!("Searching {} for '{term}'", source.name());
    }

    let builder = PoolBuilder::with_config(Arc::new(source), PoolConfig::default());
    let mut session = RecipeSession::new(builder);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(session.search(&term));

    // A failed search is an error; an empty one is not
    if let Some(message) = session.state().error() {
        anyhow::bail!("{message}");
    }

    // The filter narrows the search results
    session.set_filter(args.filter);
    let recipes: Vec<&Recipe> = session.visible().into_iter().take(args.max_recipes).collect();

    match format {
        OutputFormat::Text => print_text_results(&term, &recipes, args.filter),
        OutputFormat::Json => print_json_results(&term, &recipes, args.filter)?,
        OutputFormat::Tsv => print_tsv_results(&recipes),
    }

    Ok(())
}

fn print_text_results(term: &str, recipes: &[&Recipe], filter: RecipeFilter) {
    if recipes.is_empty() {
        println!("No recipes found for '{term}' ({filter}).");
        return;
    }

    println!("Search results for '{term}' ({filter}, {} shown)\n", recipes.len());
    for recipe in recipes {
        let flags = recipe_flags(recipe);
        println!(
            "  {:<10} {:<40} {:>4} min  {}",
            recipe.id.as_str(),
            truncate(&recipe.title, 40),
            recipe.total_minutes(),
            flags
        );
        if let Some(desc) = &recipe.description {
            println!("  {:<10} {}", "", desc);
        }
    }
}

fn print_json_results(term: &str, recipes: &[&Recipe], filter: RecipeFilter) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "term": term,
        "filter": filter,
        "count": recipes.len(),
        "recipes": recipes,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(recipes: &[&Recipe]) {
    println!("id\ttitle\tdescription\ttotal_minutes\tingredients\tfast\tvegetarian");
    for recipe in recipes {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            recipe.id,
            recipe.title,
            recipe.description.as_deref().unwrap_or(""),
            recipe.total_minutes(),
            recipe.ingredients.len(),
            recipe.is_fast(),
            recipe.is_vegetarian()
        );
    }
}
