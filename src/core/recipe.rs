use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::{RecipeId, FAST_MAX_MINUTES, VEGETARIAN_MARKER};

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Free-text ingredient name (e.g. "Cherry Tomatoes")
    #[serde(default)]
    pub name: Option<String>,

    /// Amount as written by the source (e.g. "200", "1/2 cup")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl RecipeIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            quantity: None,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A recipe as normalized from any recipe source.
///
/// Match and missing counts are not stored here; they are derived per ranking
/// pass by [`crate::matching::scoring::RecipeScore`]. Identity is the `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub prep_time_minutes: u32,

    #[serde(default)]
    pub cook_time_minutes: u32,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<RecipeIngredient>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub instructions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Sources sometimes send `null` where a list is expected
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: RecipeId::new(id),
            title: title.into(),
            description: None,
            prep_time_minutes: 0,
            cook_time_minutes: 0,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            image_url: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_times(mut self, prep_minutes: u32, cook_minutes: u32) -> Self {
        self.prep_time_minutes = prep_minutes;
        self.cook_time_minutes = cook_minutes;
        self
    }

    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<RecipeIngredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Convenience for tests and fixtures: ingredients given by name only
    #[must_use]
    pub fn with_ingredient_names(self, names: &[&str]) -> Self {
        self.with_ingredients(names.iter().map(|n| RecipeIngredient::new(*n)).collect())
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Preparation plus cooking time
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        // Source times are untrusted
        self.prep_time_minutes.saturating_add(self.cook_time_minutes)
    }

    #[must_use]
    pub fn is_fast(&self) -> bool {
        self.total_minutes() <= FAST_MAX_MINUTES
    }

    /// True if the title or description carries the vegetarian marker
    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        // Title first, then description
        contains_ignore_case(&self.title, VEGETARIAN_MARKER)
            || self
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, VEGETARIAN_MARKER))
    }

    /// Ingredient names, skipping entries without one
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().filter_map(|i| i.name.as_deref())
    }
}

/// Case-insensitive substring test
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_minutes_and_fast() {
        let recipe = Recipe::new("1", "Pasta Carbonara").with_times(10, 15);
        assert_eq!(recipe.total_minutes(), 25);
        assert!(recipe.is_fast());

        let slow = Recipe::new("2", "Slow Pasta Bake").with_times(20, 70);
        assert!(!slow.is_fast());

        let edge = Recipe::new("3", "Edge").with_times(15, 15);
        assert!(edge.is_fast());
    }

    #[test]
    fn test_is_vegetarian_title_or_description() {
        assert!(Recipe::new("1", "Veggie Chili").is_vegetarian());
        assert!(Recipe::new("2", "Lentil Soup")
            .with_description("Indian, Vegetarian")
            .is_vegetarian());
        assert!(!Recipe::new("3", "Beef Stew")
            .with_description("British, Beef")
            .is_vegetarian());
    }

    #[test]
    fn test_equality_uses_id_only() {
        let a = Recipe::new("52771", "Spicy Arrabiata Penne");
        let b = Recipe::new("52771", "Renamed").with_times(5, 5);
        assert_eq!(a, b);
        assert_ne!(a, Recipe::new("52772", "Spicy Arrabiata Penne"));
    }

    #[test]
    fn test_null_ingredients_deserialize_as_empty() {
        let json = r#"{"id": "9", "title": "Mystery", "ingredients": null, "instructions": null}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
        assert_eq!(recipe.prep_time_minutes, 0);
    }

    #[test]
    fn test_ingredient_names_skips_missing() {
        let recipe = Recipe::new("1", "Salad").with_ingredients(vec![
            RecipeIngredient::new("Lettuce"),
            RecipeIngredient::default(),
            RecipeIngredient::new("Tomato").with_quantity("2"),
        ]);
        let names: Vec<&str> = recipe.ingredient_names().collect();
        assert_eq!(names, vec!["Lettuce", "Tomato"]);
    }
}
