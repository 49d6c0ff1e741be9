use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::core::recipe::Recipe;

/// A single recipe lookup failed
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Recipe source returned status {status} for '{term}'")]
    Status { status: u16, term: String },

    #[error("Failed to decode recipe source response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid lookup term: {0}")]
    InvalidTerm(String),

    #[error("Recipe source unavailable: {0}")]
    Unavailable(String),
}

/// A catalog of recipes that can be queried by ingredient or free-text term.
///
/// Implementations return recipes already normalized to [`Recipe`].
pub trait RecipeSource: Send + Sync {
    /// Recipes related to one inventory ingredient name
    fn fetch_by_ingredient(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Recipe>, LookupError>> + Send;

    /// Recipes for a manual search term
    fn search_by_term(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<Recipe>, LookupError>> + Send;

    /// Short name for logs and CLI output
    fn name(&self) -> &str;
}

impl<S: RecipeSource> RecipeSource for Arc<S> {
    fn fetch_by_ingredient(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Recipe>, LookupError>> + Send {
        self.as_ref().fetch_by_ingredient(name)
    }

    fn search_by_term(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<Recipe>, LookupError>> + Send {
        self.as_ref().search_by_term(term)
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }
}
