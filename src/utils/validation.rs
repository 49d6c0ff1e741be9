//! Centralized validation and helper functions.

/// Maximum number of inventory items accepted from a single file (DOS protection)
pub const MAX_INVENTORY_ITEMS: usize = 10_000;

/// Longest search term sent to a recipe source
pub const MAX_TERM_LENGTH: usize = 100;

/// Trim an ingredient or item name.
/// Returns None if nothing is left.
///
/// # Examples
///
/// ```
/// use fridgemate::utils::validation::normalize_name;
///
/// assert_eq!(normalize_name("  Cherry Tomatoes "), Some("Cherry Tomatoes".to_string()));
/// assert_eq!(normalize_name("   "), None);
/// ```
#[must_use]
pub fn normalize_name(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check if adding another item would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new item.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_item_limit(count: usize) -> Option<String> {
    if count >= MAX_INVENTORY_ITEMS {
        Some(format!(
            "Too many inventory items: adding another would exceed maximum of {MAX_INVENTORY_ITEMS}"
        ))
    } else {
        None
    }
}

/// Search term validation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Search term too long: exceeds {MAX_TERM_LENGTH} characters")]
    TermTooLong,
    #[error("Search term contains control characters")]
    InvalidTerm,
}

/// Validate a search term typed by the user.
///
/// Surrounding whitespace is trimmed. An empty term is allowed; sources treat
/// it as "everything" or "nothing" as they see fit.
///
/// # Errors
///
/// Returns `ValidationError::TermTooLong` if the trimmed term exceeds
/// [`MAX_TERM_LENGTH`] characters, or `ValidationError::InvalidTerm` if it
/// contains control characters.
pub fn validate_term(term: &str) -> Result<String, ValidationError> {
    let term = term.trim();

    // Count characters, not bytes
    if term.chars().count() > MAX_TERM_LENGTH {
        return Err(ValidationError::TermTooLong);
    }

    // Reject control characters
    if term.chars().any(char::is_control) {
        return Err(ValidationError::InvalidTerm);
    }

    Ok(term.to_string())
}
