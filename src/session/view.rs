use crate::core::recipe::{contains_ignore_case, Recipe};
use crate::core::types::RecipeFilter;
use crate::matching::engine::RankedRecipe;

/// Compose the visible recipe list.
///
/// The base list is the ranked list for [`RecipeFilter::Fridge`] and the whole
/// pool otherwise. A non-blank `search_text` keeps recipes whose title contains
/// it (case-insensitive), then the categorical filter applies. `Fridge` with an
/// empty ranked list is empty, never the pool.
#[must_use]
pub fn visible_list<'a>(
    pool: &'a [Recipe],
    ranked: &'a [RankedRecipe],
    filter: RecipeFilter,
    search_text: &str,
) -> Vec<&'a Recipe> {
    // Choose the base list
    let base: Vec<&Recipe> = match filter {
        RecipeFilter::Fridge => ranked.iter().map(|r| &r.recipe).collect(),
        _ => pool.iter().collect(),
    };

    // Search text first, then the categorical filter
    let needle = search_text.trim();
    base.into_iter()
        .filter(|recipe| needle.is_empty() || contains_ignore_case(&recipe.title, needle))
        .filter(|recipe| match filter {
            RecipeFilter::All | RecipeFilter::Fridge => true,
            RecipeFilter::Fast => recipe.is_fast(),
            RecipeFilter::Veggie => recipe.is_vegetarian(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inventory::InventoryItem;
    use crate::matching::engine::rank;

    fn titles(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.title.clone()).collect()
    }

    fn pasta_pool() -> Vec<Recipe> {
        vec![
            Recipe::new("1", "Pasta Carbonara").with_times(10, 15),
            Recipe::new("2", "Slow Pasta Bake").with_times(30, 60),
            Recipe::new("3", "Quick Omelette").with_times(5, 5),
        ]
    }

    #[test]
    fn test_search_then_fast() {
        let pool = pasta_pool();
        let visible = visible_list(&pool, &[], RecipeFilter::Fast, "pasta");
        assert_eq!(titles(&visible), vec!["Pasta Carbonara"]);
    }

    #[test]
    fn test_all_with_blank_search_is_whole_pool() {
        let pool = pasta_pool();
        assert_eq!(visible_list(&pool, &[], RecipeFilter::All, "   ").len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let pool = pasta_pool();
        let visible = visible_list(&pool, &[], RecipeFilter::All, "OMELETTE");
        assert_eq!(titles(&visible), vec!["Quick Omelette"]);
    }

    #[test]
    fn test_veggie() {
        let pool = vec![
            Recipe::new("1", "Veggie Lasagne"),
            Recipe::new("2", "Dal").with_description("Indian, Vegetarian"),
            Recipe::new("3", "Beef Lasagne").with_description("Italian, Beef"),
        ];
        let visible = visible_list(&pool, &[], RecipeFilter::Veggie, "");
        assert_eq!(titles(&visible), vec!["Veggie Lasagne", "Dal"]);
    }

    #[test]
    fn test_fridge_uses_ranked_order() {
        let pool = vec![
            Recipe::new("1", "Toast").with_ingredient_names(&["Bread"]),
            Recipe::new("2", "Egg Sandwich").with_ingredient_names(&["Bread", "Egg"]),
            Recipe::new("3", "Soup").with_ingredient_names(&["Leek"]),
        ];
        let inventory = vec![InventoryItem::named("Bread"), InventoryItem::named("Egg")];
        let ranked = rank(&pool, &inventory);

        let visible = visible_list(&pool, &ranked, RecipeFilter::Fridge, "");
        assert_eq!(titles(&visible), vec!["Egg Sandwich", "Toast"]);

        let searched = visible_list(&pool, &ranked, RecipeFilter::Fridge, "toast");
        assert_eq!(titles(&searched), vec!["Toast"]);
    }

    #[test]
    fn test_fridge_with_nothing_ranked_is_empty() {
        let pool = pasta_pool();
        assert!(visible_list(&pool, &[], RecipeFilter::Fridge, "").is_empty());
    }
}
