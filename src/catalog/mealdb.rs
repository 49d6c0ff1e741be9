//! TheMealDB recipe source.
//!
//! Both lookups go through `search.php?s=<term>`: ingredient lookups search by
//! the ingredient name as a meal-name term, the way the mobile app always did.
//! Meals are normalized into [`Recipe`] by [`normalize_meal`].

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::source::{LookupError, RecipeSource};
use crate::core::recipe::{Recipe, RecipeIngredient};

/// Public TheMealDB endpoint (test API key "1")
pub const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// TheMealDB exposes at most 20 ingredient/measure slots per meal
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// TheMealDB has no timing data; every meal gets these
pub const DEFAULT_PREP_MINUTES: u32 = 15;
pub const DEFAULT_COOK_MINUTES: u32 = 25;

const DEFAULT_AREA: &str = "International";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `search.php` response; `meals` is `null` when nothing matched
#[derive(Debug, Deserialize)]
pub struct MealDbResponse {
    pub meals: Option<Vec<MealDbMeal>>,
}

/// A meal as returned by TheMealDB.
///
/// The numbered `strIngredientN`/`strMeasureN` slots land in `slots`.
#[derive(Debug, Clone, Deserialize)]
pub struct MealDbMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub slots: HashMap<String, serde_json::Value>,
}

impl MealDbMeal {
    fn slot(&self, key: &str) -> Option<&str> {
        self.slots
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Map a TheMealDB meal onto the recipe shape the matching engine consumes
#[must_use]
pub fn normalize_meal(meal: &MealDbMeal) -> Recipe {
    // Numbered slots; blank or null slots are skipped
    let ingredients = (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|i| {
            let name = meal.slot(&format!("strIngredient{i}"))?;
            let mut ingredient = RecipeIngredient::new(name);
            ingredient.quantity = meal.slot(&format!("strMeasure{i}")).map(str::to_string);
            Some(ingredient)
        })
        .collect();

    // One step per non-blank line
    let instructions = meal
        .instructions
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    // Description is "Area, Category"
    let area = meal
        .area
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_AREA);
    let description = match meal.category.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => format!("{area}, {category}"),
        _ => area.to_string(),
    };

    let mut recipe = Recipe::new(meal.id.clone(), meal.name.clone())
        .with_description(description)
        .with_times(DEFAULT_PREP_MINUTES, DEFAULT_COOK_MINUTES)
        .with_ingredients(ingredients)
        .with_instructions(instructions);
    recipe.image_url = meal.thumbnail.clone();
    recipe
}

/// HTTP client for TheMealDB
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    /// Client for the public endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(DEFAULT_MEALDB_URL)
    }

    /// Client for a custom base URL (mirror, proxy or test server)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `search.php?s=<term>`, normalized
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Http` on transport failure, `LookupError::Status`
    /// for a non-success response and `LookupError::Decode` for a malformed body.
    pub async fn search_meals(&self, term: &str) -> Result<Vec<Recipe>, LookupError> {
        let url = format!("{}/search.php", self.base_url);
        tracing::debug!(%url, term, "Querying TheMealDB");

        // Send request
        let response = self.client.get(&url).query(&[("s", term)]).send().await?;
        // Check status
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                term: term.to_string(),
            });
        }

        // Parse response; `meals: null` means no matches
        let body = response.bytes().await?;
        let parsed: MealDbResponse = serde_json::from_slice(&body)?;
        Ok(parsed
            .meals
            .unwrap_or_default()
            .iter()
            .map(normalize_meal)
            .collect())
    }
}

impl RecipeSource for MealDbClient {
    async fn fetch_by_ingredient(&self, name: &str) -> Result<Vec<Recipe>, LookupError> {
        // Blank names never reach the network
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::InvalidTerm(
                "ingredient name is blank".to_string(),
            ));
        }
        self.search_meals(name).await
    }

    async fn search_by_term(&self, term: &str) -> Result<Vec<Recipe>, LookupError> {
        // A blank term is valid: TheMealDB returns a default selection
        self.search_meals(term.trim()).await
    }

    fn name(&self) -> &str {
        "mealdb"
    }
}
