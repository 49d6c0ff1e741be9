//! Parsers for reading a fridge inventory from files.
//!
//! This module provides parsers for:
//!
//! - **JSON**: An array of items, or the inventory backend's `{"ingredients": [...]}` response
//! - **TSV/CSV files**: One item per line
//!
//! ## Example
//!
//! ```rust,no_run
//! use fridgemate::parsing::parse_inventory_file;
//! use std::path::Path;
//!
//! let inventory = parse_inventory_file(Path::new("fridge.tsv")).unwrap();
//! for item in &inventory {
//!     println!("{}", item.name);
//! }
//! ```
//!
//! ## Columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | name | Ingredient name | Yes |
//! | quantity | Amount as written | No |
//! | unit | Unit for the amount | No |
//! | category | Free-text category | No |
//! | expiry_date | ISO date, optionally with time | No |
//!
//! Items without an id get their 1-based position as id. Blank names are
//! rejected and at most [`MAX_INVENTORY_ITEMS`](crate::utils::validation::MAX_INVENTORY_ITEMS)
//! items are read.

pub mod json;
pub mod tsv;

use std::path::Path;
use thiserror::Error;

use crate::core::inventory::InventoryItem;
use crate::utils::validation::MAX_INVENTORY_ITEMS;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid inventory JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid inventory format: {0}")]
    InvalidFormat(String),

    #[error("Too many inventory items: {0} exceeds maximum allowed ({MAX_INVENTORY_ITEMS})")]
    TooManyItems(usize),
}

/// Inventory file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFormat {
    Json,
    Tsv,
    Csv,
}

impl InventoryFormat {
    /// Format implied by a file extension, if recognized
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)?;

        match extension.as_str() {
            "json" => Some(Self::Json),
            "tsv" | "txt" => Some(Self::Tsv),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Guess the format from content: JSON if it opens with `[` or `{`,
    /// CSV if the first data line has a comma but no tab, TSV otherwise.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        // JSON documents open with an array or object
        let trimmed = text.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            return Self::Json;
        }

        // First non-comment line decides between CSV and TSV
        let first_line = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .unwrap_or_default();
        if first_line.contains(',') && !first_line.contains('\t') {
            Self::Csv
        } else {
            Self::Tsv
        }
    }
}

/// Parse an inventory file, choosing the parser from the extension.
/// Unknown extensions fall back to content detection.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the error of the
/// format-specific parser.
pub fn parse_inventory_file(path: &Path) -> Result<Vec<InventoryItem>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    // Extension first, then content
    let format = InventoryFormat::from_path(path).unwrap_or_else(|| InventoryFormat::detect(&content));
    tracing::debug!(path = %path.display(), ?format, "Parsing inventory file");
    parse_inventory_text(&content, format)
}

/// Parse inventory text in a known format
///
/// # Errors
///
/// Returns the error of the format-specific parser.
pub fn parse_inventory_text(
    text: &str,
    format: InventoryFormat,
) -> Result<Vec<InventoryItem>, ParseError> {
    match format {
        InventoryFormat::Json => json::parse_inventory_json(text),
        InventoryFormat::Tsv => tsv::parse_inventory_tsv(text, '\t'),
        InventoryFormat::Csv => tsv::parse_inventory_tsv(text, ','),
    }
}
