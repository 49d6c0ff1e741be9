use crate::core::inventory::InventoryItem;
use crate::parsing::ParseError;
use crate::utils::validation::{check_item_limit, normalize_name};

/// Parse TSV/CSV text with columns: name, [quantity], [unit], [category], [expiry_date]
///
/// Empty optional fields are treated as absent. Lines starting with `#` are
/// comments, and a first data line whose first field is `name`, `item` or
/// `ingredient` is taken as a header.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has a blank name, or
/// `ParseError::TooManyItems` if the limit is exceeded.
pub fn parse_inventory_tsv(text: &str, delimiter: char) -> Result<Vec<InventoryItem>, ParseError> {
    let mut inventory = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Split by delimiter
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        // Skip header line
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "name" || first == "item" || first == "ingredient" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let name = fields
            .first()
            .and_then(|f| normalize_name(f))
            .ok_or_else(|| ParseError::InvalidFormat(format!("Line {line_num} has a blank name")))?;

        // Check item limit before adding
        if check_item_limit(inventory.len()).is_some() {
            return Err(ParseError::TooManyItems(inventory.len()));
        }

        let field = |idx: usize| {
            fields
                .get(idx)
                .filter(|f| !f.is_empty())
                .map(|f| (*f).to_string())
        };

        // Ids are 1-based positions among data lines
        let mut item = InventoryItem::new((inventory.len() + 1).to_string(), name);
        item.quantity = field(1);
        item.unit = field(2);
        item.category = field(3);
        item.expiry_date = field(4);

        inventory.push(item);
    }

    Ok(inventory)
}
