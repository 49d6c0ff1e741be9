//! End-to-end tests of the recommendation pipeline through the public API:
//! inventory, pool building, ranking and the session view.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use fridgemate::catalog::mealdb::MealDbClient;
use fridgemate::session::view::visible_list;
use fridgemate::{
    InventoryItem, LookupError, MatchingConfig, PoolBuilder, RankingEngine, Recipe, RecipeCatalog,
    RecipeFilter, RecipeScore, RecipeSession, RecipeSource, TieBreak,
};

/// Source answering from a fixed table, failing for listed names
struct TableSource {
    by_name: HashMap<&'static str, Vec<Recipe>>,
    failing: Vec<&'static str>,
    calls: AtomicUsize,
}

impl TableSource {
    fn new(by_name: HashMap<&'static str, Vec<Recipe>>) -> Self {
        Self {
            by_name,
            failing: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn lookup(&self, name: &str) -> Result<Vec<Recipe>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&name) {
            return Err(LookupError::Unavailable(format!("{name} lookup timed out")));
        }
        Ok(self.by_name.get(name).cloned().unwrap_or_default())
    }
}

impl RecipeSource for TableSource {
    async fn fetch_by_ingredient(&self, name: &str) -> Result<Vec<Recipe>, LookupError> {
        self.lookup(name)
    }

    async fn search_by_term(&self, term: &str) -> Result<Vec<Recipe>, LookupError> {
        self.lookup(term)
    }

    fn name(&self) -> &str {
        "table"
    }
}

fn fridge(names: &[&str]) -> Vec<InventoryItem> {
    names.iter().map(|n| InventoryItem::named(*n)).collect()
}

fn ids(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.id.as_str()).collect()
}

#[tokio::test]
async fn test_chicken_and_rice_scenario() {
    let a = Recipe::new("A", "Chicken Rice").with_ingredient_names(&["Chicken", "Garlic", "Rice"]);
    let b = Recipe::new("B", "Beef Stew").with_ingredient_names(&["Beef", "Onion"]);
    let source = TableSource::new(HashMap::from([
        ("Chicken", vec![a.clone(), b.clone()]),
        ("Rice", vec![a.clone()]),
    ]));
    let inventory = fridge(&["Chicken", "Rice"]);

    let outcome = PoolBuilder::new(source).build_pool(&inventory).await;
    assert_eq!(ids(&outcome.recipes), vec!["A", "B"]);

    let ranked = RankingEngine::new().rank(&outcome.recipes, &inventory);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].recipe.id.as_str(), "A");
    assert_eq!(ranked[0].score, RecipeScore { matching_count: 2, missing_count: 1 });
}

#[tokio::test]
async fn test_partial_failure_keeps_other_lookups() {
    let mut source = TableSource::new(HashMap::from([
        ("Egg", vec![Recipe::new("1", "Omelette")]),
        ("Milk", vec![Recipe::new("2", "Pancakes")]),
        ("Flour", vec![Recipe::new("2", "Pancakes"), Recipe::new("3", "Bread")]),
    ]));
    // Milk fails; Egg and Flour still contribute
    source.failing.push("Milk");

    let outcome = PoolBuilder::new(source).build_pool(&fridge(&["Egg", "Milk", "Flour"])).await;
    assert_eq!(ids(&outcome.recipes), vec!["1", "2", "3"]);
    assert_eq!(outcome.lookups, 3);
    assert_eq!(outcome.failed_lookups, 1);
    assert!(outcome.advisory.is_none());
}

#[tokio::test]
async fn test_duplicate_ids_collapse() {
    let arrabiata = Recipe::new("52771", "Spicy Arrabiata Penne");
    let source = TableSource::new(HashMap::from([
        ("Garlic", vec![arrabiata.clone()]),
        ("Tomato", vec![arrabiata]),
    ]));

    let outcome = PoolBuilder::new(source).build_pool(&fridge(&["Garlic", "Tomato"])).await;
    assert_eq!(ids(&outcome.recipes), vec!["52771"]);
}

#[tokio::test]
async fn test_empty_fridge_issues_one_fallback_call() {
    let builder = PoolBuilder::new(TableSource::new(HashMap::from([(
        "Pasta",
        vec![Recipe::new("p", "Pasta Bake")],
    )])));

    // No names at all: exactly one fallback lookup
    let outcome = builder.build_pool(&[]).await;
    assert_eq!(builder.source().calls.load(Ordering::SeqCst), 1);
    assert_eq!(ids(&outcome.recipes), vec!["p"]);
}

#[tokio::test]
async fn test_every_lookup_failing_is_not_fatal() {
    let mut source = TableSource::new(HashMap::new());
    source.failing.extend(["Egg", "Milk"]);

    let outcome = PoolBuilder::new(source).build_pool(&fridge(&["Egg", "Milk"])).await;
    assert!(outcome.recipes.is_empty());
    assert_eq!(outcome.failed_lookups, 2);
    assert!(outcome.advisory.unwrap().contains("2 of 2"));
}

#[test]
fn test_visible_list_pasta_fast() {
    let pool = vec![
        Recipe::new("1", "Pasta Carbonara").with_times(10, 15),
        Recipe::new("2", "Slow Pasta Bake").with_times(30, 60),
    ];
    let visible = visible_list(&pool, &[], RecipeFilter::Fast, "pasta");
    let titles: Vec<&str> = visible.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Pasta Carbonara"]);
}

#[tokio::test]
async fn test_session_over_embedded_catalog() {
    let catalog = RecipeCatalog::load_embedded().unwrap();
    let mut session = RecipeSession::new(PoolBuilder::new(catalog));

    session.load_from_inventory(fridge(&["Chicken", "Rice"])).await;
    assert_eq!(session.state().filter(), RecipeFilter::Fridge);
    let first: Vec<String> = session.visible().iter().map(|r| r.id.as_str().to_string()).collect();
    assert_eq!(first, vec!["52940", "52813", "52795"]);

    // Idempotent: same inventory, same order
    session.load_from_inventory(fridge(&["Chicken", "Rice"])).await;
    let second: Vec<String> = session.visible().iter().map(|r| r.id.as_str().to_string()).collect();
    assert_eq!(first, second);

    // A manual search leaves the fridge view
    session.search("pasta").await;
    assert_eq!(session.state().filter(), RecipeFilter::All);
    assert!(session.visible().iter().all(|r| r.title.to_lowercase().contains("pasta")));
}

#[test]
fn test_tie_break_by_title_over_catalog() {
    let catalog = RecipeCatalog::load_embedded().unwrap();
    let inventory = fridge(&["Onion"]);
    let engine = RankingEngine::with_config(MatchingConfig {
        tie_break: TieBreak::Title,
        limit: None,
    });

    let ranked = engine.rank(&catalog.recipes, &inventory);
    let titles: Vec<&str> = ranked.iter().map(|r| r.recipe.title.as_str()).collect();
    assert_eq!(titles, vec!["Beef Stew", "Chicken Fried Rice", "Chicken Handi", "Dal Fry", "Shakshuka"]);
}

#[tokio::test]
async fn test_session_against_mealdb() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/search.php")
        .match_query(mockito::Matcher::UrlEncoded("s".into(), "chicken".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meals": [{"idMeal": "52795", "strMeal": "Chicken Handi", "strArea": "Indian",
                "strCategory": "Chicken", "strIngredient1": "Chicken", "strIngredient2": "Onion"}]}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/search.php")
        .match_query(mockito::Matcher::UrlEncoded("s".into(), "saffron".into()))
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    // Saffron finds nothing; only Chicken Handi makes the pool
    let client = MealDbClient::with_base_url(server.url()).unwrap();
    let mut session = RecipeSession::new(PoolBuilder::new(client));
    session.load_from_inventory(fridge(&["chicken", "saffron"])).await;

    let visible: Vec<&str> = session.visible().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(visible, vec!["Chicken Handi"]);
    assert_eq!(session.state().ranked()[0].score.missing_count, 1);
}
