//! Recommend command - rank recipes for the contents of a fridge.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;

use crate::cli::{read_inventory, recipe_flags, truncate, OutputFormat, SourceArgs};
use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;
use crate::core::types::{RecipeFilter, TieBreak};
use crate::matching::engine::{MatchingConfig, RankingEngine};
use crate::matching::pool::{PoolBuilder, PoolConfig, DEFAULT_FALLBACK_TERM};
use crate::matching::scoring::RecipeScore;
use crate::session::RecipeSession;

/// Items expiring within this many days are listed as "use soon"
const EXPIRING_SOON_DAYS: i64 = 3;

/// Arguments for the recommend command
#[derive(Args)]
pub struct RecommendArgs {
    /// Inventory file (JSON, TSV or CSV), or - for stdin
    #[arg(required = true)]
    pub inventory: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum number of recipes to show
    #[arg(short = 'n', long, default_value = "10")]
    pub max_recipes: usize,

    /// Order for recipes with the same number of matched ingredients
    #[arg(long, default_value = "pool-order")]
    pub tie_break: TieBreak,

    /// Recipe filter; defaults to the ranked fridge list when the inventory is non-empty
    #[arg(long)]
    pub filter: Option<RecipeFilter>,

    /// Only show recipes whose title contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Term looked up when the inventory is empty
    #[arg(long, default_value = DEFAULT_FALLBACK_TERM)]
    pub fallback_term: String,

    /// Cap on recipe lookups in flight at once (default: all at once)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// One line of output
struct Recommendation<'a> {
    recipe: &'a Recipe,
    score: RecipeScore,
}

/// Execute the recommend command
///
/// # Errors
///
/// Returns an error if the inventory cannot be read or the source cannot be built.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: RecommendArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inventory = read_inventory(&args.inventory)?;
    if verbose {
        eprintln!("Read {} inventory items", inventory.len());
    }

    // Build source, pool builder and engine
    let source = args.source.build()?;
    let builder = PoolBuilder::with_config(
        Arc::new(source),
        PoolConfig {
            fallback_term: args.fallback_term.clone(),
            max_concurrent_lookups: args.concurrency,
        },
    );
    // Rank the whole pool; -n only limits what is printed
    let engine = RankingEngine::with_config(MatchingConfig {
        tie_break: args.tie_break,
        limit: None,
    });
    let mut session = RecipeSession::with_engine(builder, engine);

    // Fetch and rank
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(session.load_from_inventory(inventory.clone()));

    // Explicit filter and search text override the session defaults
    if let Some(filter) = args.filter {
        session.set_filter(filter);
    }
    if let Some(text) = &args.search {
        session.set_search_text(text.as_str());
    }

    let state = session.state();
    if verbose {
        eprintln!(
            "Pool has {} recipes, {} contain something from the fridge",
            state.pool().len(),
            state.ranked().len()
        );
    }

    // Ranked recipes carry a score; pool-only recipes are scored here
    let recommendations: Vec<Recommendation<'_>> = session
        .visible()
        .into_iter()
        .take(args.max_recipes)
        .map(|recipe| Recommendation {
            recipe,
            score: state
                .ranked()
                .iter()
                .find(|r| r.recipe.id == recipe.id)
                .map_or_else(|| RecipeScore::calculate(recipe, &inventory), |r| r.score),
        })
        .collect();

    let today = chrono::Local::now().date_naive();
    let expiring = expiring_soon(&inventory, today, EXPIRING_SOON_DAYS);

    match format {
        OutputFormat::Text => {
            print_text_results(&recommendations, state.filter(), state.advisory(), &expiring);
        }
        OutputFormat::Json => {
            print_json_results(&recommendations, state.filter(), state.advisory(), &expiring)?;
        }
        OutputFormat::Tsv => print_tsv_results(&recommendations),
    }

    Ok(())
}

/// Items with a parseable expiry date no later than `today + days`, soonest first
#[must_use]
pub fn expiring_soon(inventory: &[InventoryItem], today: NaiveDate, days: i64) -> Vec<(&InventoryItem, NaiveDate)> {
    // Items without a parseable date are skipped
    let cutoff = today + chrono::Duration::days(days);
    let mut expiring: Vec<(&InventoryItem, NaiveDate)> = inventory
        .iter()
        .filter_map(|item| item.expiry().map(|date| (item, date)))
        .filter(|(_, date)| *date <= cutoff)
        .collect();
    expiring.sort_by_key(|(_, date)| *date);
    expiring
}

fn print_text_results(
    recommendations: &[Recommendation<'_>],
    filter: RecipeFilter,
    advisory: Option<&str>,
    expiring: &[(&InventoryItem, NaiveDate)],
) {
    if !expiring.is_empty() {
        let names: Vec<String> = expiring
            .iter()
            .map(|(item, date)| format!("{} ({date})", item.name))
            .collect();
        println!("Use soon: {}\n", names.join(", "));
    }

    if recommendations.is_empty() {
        println!("No recipes found ({filter}).");
        if let Some(msg) = advisory {
            println!("   {msg}");
        }
        return;
    }

    // Calculate dynamic column widths
    let title_width = recommendations
        .iter()
        .map(|r| r.recipe.title.chars().count().min(40))
        .max()
        .unwrap_or(6)
        .max(6);

    println!("Recipes ({filter}, {} shown)\n", recommendations.len());
    println!(
        "{:>3}  {:<title_w$} {:>8} {:>8} {:>6}  Tags",
        "#",
        "Recipe",
        "Have",
        "Missing",
        "Mins",
        title_w = title_width
    );
    println!("{}", "-".repeat(title_width + 40));

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{:>3}  {:<title_w$} {:>8} {:>8} {:>6}  {}",
            i + 1,
            truncate(&rec.recipe.title, title_width),
            format!("{}/{}", rec.score.matching_count, rec.score.total()),
            rec.score.missing_count,
            rec.recipe.total_minutes(),
            recipe_flags(rec.recipe),
            title_w = title_width
        );
    }
}

fn print_json_results(
    recommendations: &[Recommendation<'_>],
    filter: RecipeFilter,
    advisory: Option<&str>,
    expiring: &[(&InventoryItem, NaiveDate)],
) -> anyhow::Result<()> {
    let recipes: Vec<serde_json::Value> = recommendations
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            serde_json::json!({
                "rank": i + 1,
                "id": rec.recipe.id,
                "title": rec.recipe.title,
                "matching_count": rec.score.matching_count,
                "missing_count": rec.score.missing_count,
                "coverage": rec.score.coverage(),
                "total_minutes": rec.recipe.total_minutes(),
                "fast": rec.recipe.is_fast(),
                "vegetarian": rec.recipe.is_vegetarian(),
            })
        })
        .collect();

    let use_soon: Vec<serde_json::Value> = expiring
        .iter()
        .map(|(item, date)| serde_json::json!({ "name": item.name, "expiry_date": date.to_string() }))
        .collect();

    let output = serde_json::json!({
        "filter": filter,
        "advisory": advisory,
        "expiring_soon": use_soon,
        "recipes": recipes,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(recommendations: &[Recommendation<'_>]) {
    println!("rank\tid\ttitle\tmatching\tmissing\ttotal_minutes\tfast\tvegetarian");
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            rec.recipe.id,
            rec.recipe.title,
            rec.score.matching_count,
            rec.score.missing_count,
            rec.recipe.total_minutes(),
            rec.recipe.is_fast(),
            rec.recipe.is_vegetarian()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiring_soon_orders_by_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let inventory = vec![
            InventoryItem::named("Yogurt").with_expiry_date("2026-10-21"),
            InventoryItem::named("Milk").with_expiry_date("2026-10-19T09:00:00Z"),
            InventoryItem::named("Cheese").with_expiry_date("2026-11-30"),
            InventoryItem::named("Salt"),
            InventoryItem::named("Ham").with_expiry_date("2026-10-10"),
        ];

        let names: Vec<&str> = expiring_soon(&inventory, today, 3)
            .iter()
            .map(|(item, _)| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ham", "Milk", "Yogurt"]);
    }

    #[test]
    fn test_expiring_soon_none() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let inventory = vec![InventoryItem::named("Rice")];
        assert!(expiring_soon(&inventory, today, 3).is_empty());
    }
}
