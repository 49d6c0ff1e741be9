use std::path::Path;

const CATALOG_PATH: &str = "catalogs/recipes.json";

fn main() {
    validate_catalog_file(Path::new(CATALOG_PATH));
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the recipe catalog before building.\n",
        catalog_path.display()
    );

    // Read catalog file
    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    // Parse and validate JSON
    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    // Validate structure
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n"
    );

    assert!(
        catalog.get("version").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Missing 'version' string\n"
    );

    let recipes = catalog.get("recipes").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'recipes' field\n\
             The catalog must have a top-level 'recipes' array.\n"
        );
    });

    let recipes = recipes.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'recipes' must be an array\n\
             Got: {recipes}\n"
        );
    });

    // Validate each recipe
    let total_ingredients = validate_recipes(recipes);

    println!(
        "cargo:warning=Validated catalog: {} recipes, {total_ingredients} total ingredients",
        recipes.len()
    );
}

fn validate_recipes(recipes: &[serde_json::Value]) -> usize {
    let mut seen = std::collections::HashSet::new();
    let mut total_ingredients = 0;

    for (i, recipe) in recipes.iter().enumerate() {
        let id = recipe.get("id").and_then(|v| v.as_str()).unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Recipe at index {i} missing string 'id' field\n");
        });

        // IDs must be unique
        assert!(
            seen.insert(id.to_string()),
            "\n\nCATALOG BUILD ERROR: Duplicate recipe id '{id}' (index {i})\n"
        );
        assert!(
            recipe.get("title").and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Recipe '{id}' (index {i}) missing 'title' field\n"
        );

        total_ingredients += recipe
            .get("ingredients")
            .and_then(|v| v.as_array())
            .map_or(0, Vec::len);
    }

    total_ingredients
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed={CATALOG_PATH}");
    println!("cargo:rerun-if-changed=build.rs");
}
