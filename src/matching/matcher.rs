use crate::core::inventory::InventoryItem;

/// Decide whether a recipe ingredient is present in the inventory.
///
/// An ingredient is present if some inventory item name is a case-insensitive
/// substring of the ingredient name, or the ingredient name is a substring of
/// the item name, so a fridge "Tomato" satisfies "Cherry Tomatoes". A missing
/// or blank ingredient name is never present, and blank inventory names never
/// match anything.
#[must_use]
pub fn is_present(ingredient_name: Option<&str>, inventory: &[InventoryItem]) -> bool {
    let Some(name) = ingredient_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return false;
    };
    // Lowercase once; item names are lowercased per comparison
    let needle = name.to_lowercase();
    inventory.iter().any(|item| names_overlap(&needle, &item.name))
}

/// Lowercased inventory names, for scoring many ingredients against one inventory
#[derive(Debug, Clone)]
pub struct InventoryIndex {
    names: Vec<String>,
}

impl InventoryIndex {
    #[must_use]
    pub fn new(inventory: &[InventoryItem]) -> Self {
        // Blank names would match every ingredient as a substring
        let names = inventory
            .iter()
            .map(|item| item.name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Same rule as [`is_present`], against the pre-lowercased names
    #[must_use]
    pub fn contains(&self, ingredient_name: Option<&str>) -> bool {
        let Some(name) = ingredient_name.map(str::trim).filter(|n| !n.is_empty()) else {
            return false;
        };
        let needle = name.to_lowercase();
        // Either name may contain the other
        self.names
            .iter()
            .any(|have| have.contains(&needle) || needle.contains(have.as_str()))
    }

    /// First inventory name that satisfies the ingredient, if any
    #[must_use]
    pub fn matched_by(&self, ingredient_name: &str) -> Option<&str> {
        let needle = ingredient_name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.names
            .iter()
            .find(|have| have.contains(&needle) || needle.contains(have.as_str()))
            .map(String::as_str)
    }
}

fn names_overlap(lowered_ingredient: &str, inventory_name: &str) -> bool {
    // Normalize the same way as InventoryIndex
    let have = inventory_name.trim().to_lowercase();
    if have.is_empty() {
        return false;
    }
    have.contains(lowered_ingredient) || lowered_ingredient.contains(&have)
}
