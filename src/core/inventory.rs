use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// An ingredient currently in the user's fridge.
///
/// The matching engine only ever reads these; the inventory store owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Store identifier; the backend sends either `_id` or `id`
    #[serde(default, alias = "_id")]
    pub id: String,

    pub name: String,

    /// Amount as entered; numeric JSON values are kept as their text
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub quantity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// ISO date, optionally with a time component
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "expiryDate")]
    pub expiry_date: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        // Absent and null both mean no quantity
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl InventoryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: None,
            unit: None,
            category: None,
            expiry_date: None,
        }
    }

    /// Item with only a name, as produced by quick-add or tests
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<String>, unit: Option<&str>) -> Self {
        self.quantity = Some(quantity.into());
        self.unit = unit.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_expiry_date(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    /// Parsed expiry date, ignoring any time component.
    ///
    /// Returns `None` when the field is absent or not a recognizable ISO date.
    #[must_use]
    pub fn expiry(&self) -> Option<NaiveDate> {
        let raw = self.expiry_date.as_deref()?.trim();
        // Plain date
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        // Full timestamp with offset, as the backend stores it
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        // Naive date-times
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.date())
    }
}
