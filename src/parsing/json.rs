use serde::Deserialize;

use crate::core::inventory::InventoryItem;
use crate::parsing::ParseError;
use crate::utils::validation::{check_item_limit, normalize_name};

/// Accepted top-level JSON shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum InventoryDocument {
    Items(Vec<InventoryItem>),
    Wrapped { ingredients: Vec<InventoryItem> },
}

/// Parse an inventory from JSON.
///
/// Accepts a bare array of items or `{"ingredients": [...]}`. Names are
/// trimmed; items with no id get their 1-based position.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, `ParseError::InvalidFormat`
/// if an item has a blank name, or `ParseError::TooManyItems` if the limit is
/// exceeded.
pub fn parse_inventory_json(text: &str) -> Result<Vec<InventoryItem>, ParseError> {
    // Bare array or backend-style wrapper
    let items = match serde_json::from_str::<InventoryDocument>(text)? {
        InventoryDocument::Items(items) | InventoryDocument::Wrapped { ingredients: items } => items,
    };

    let mut inventory = Vec::with_capacity(items.len().min(1024));
    for (i, mut item) in items.into_iter().enumerate() {
        // Check item limit before adding
        if check_item_limit(inventory.len()).is_some() {
            return Err(ParseError::TooManyItems(inventory.len()));
        }

        item.name = normalize_name(&item.name).ok_or_else(|| {
            ParseError::InvalidFormat(format!("Item {} has a blank name", i + 1))
        })?;
        // Fill in missing ids
        if item.id.trim().is_empty() {
            item.id = (i + 1).to_string();
        }
        inventory.push(item);
    }

    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::MAX_INVENTORY_ITEMS;

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"id": "1", "name": "Chicken", "quantity": "2", "unit": "pcs"},
            {"name": "  Rice "}
        ]"#;
        let inventory = parse_inventory_json(json).unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0].id, "1");
        assert_eq!(inventory[1].name, "Rice");
        assert_eq!(inventory[1].id, "2");
    }

    #[test]
    fn test_parse_backend_response() {
        let json = r#"{"ingredients": [
            {"_id": "65a1", "name": "Milk", "quantity": 1, "unit": "l", "category": "Dairy",
             "expiryDate": "2026-10-21T00:00:00.000Z"}
        ]}"#;
        let inventory = parse_inventory_json(json).unwrap();
        assert_eq!(inventory[0].id, "65a1");
        assert_eq!(inventory[0].quantity.as_deref(), Some("1"));
        assert!(inventory[0].expiry().is_some());
    }

    #[test]
    fn test_empty_inventory_is_valid() {
        assert!(parse_inventory_json("[]").unwrap().is_empty());
        assert!(parse_inventory_json(r#"{"ingredients": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = parse_inventory_json(r#"[{"name": "Egg"}, {"name": "   "}]"#);
        assert!(matches!(result, Err(ParseError::InvalidFormat(msg)) if msg.contains("Item 2")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_inventory_json("[{"), Err(ParseError::Json(_))));
        assert!(matches!(parse_inventory_json(r#"{"items": []}"#), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_too_many_items() {
        let items: Vec<String> = (0..=MAX_INVENTORY_ITEMS)
            .map(|i| format!(r#"{{"name": "item{i}"}}"#))
            .collect();
        let json = format!("[{}]", items.join(","));
        assert!(matches!(
            parse_inventory_json(&json),
            Err(ParseError::TooManyItems(n)) if n == MAX_INVENTORY_ITEMS
        ));
    }
}
