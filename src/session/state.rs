use serde::Serialize;

use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;
use crate::core::types::{PoolOrigin, RecipeFilter};
use crate::matching::engine::{RankedRecipe, RankingEngine};
use crate::matching::pool::PoolOutcome;

/// Tag for one fetch; only results for the newest ticket are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct FetchTicket(u64);

/// Everything that can happen to a session
#[derive(Debug, Clone)]
pub enum Action {
    /// The fridge contents changed (add, edit, delete or initial load)
    InventoryChanged(Vec<InventoryItem>),
    /// A fetch was issued; results with older tickets become stale
    FetchStarted(FetchTicket),
    /// A fetch produced a new pool
    PoolLoaded {
        ticket: FetchTicket,
        origin: PoolOrigin,
        outcome: PoolOutcome,
    },
    /// A manual search failed
    SearchFailed { ticket: FetchTicket, message: String },
    FilterSelected(RecipeFilter),
    SearchTextChanged(String),
}

/// Recipe view state for one user session.
///
/// State only changes through [`SessionState::reduce`]. The ranked list is
/// recomputed whenever the inventory or the pool changes.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inventory: Vec<InventoryItem>,
    pool: Vec<Recipe>,
    ranked: Vec<RankedRecipe>,
    filter: RecipeFilter,
    search_text: String,
    loading: bool,
    error: Option<String>,
    advisory: Option<String>,
    latest_ticket: FetchTicket,
    pool_loaded: bool,
    seeded_from_inventory: bool,
    engine: RankingEngine,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_engine(engine: RankingEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    /// Ticket to use for the next fetch
    #[must_use]
    pub fn next_ticket(&self) -> FetchTicket {
        FetchTicket(self.latest_ticket.0 + 1)
    }

    /// Whether a pool fetch is due for this inventory: nothing loaded yet, or
    /// the first non-empty inventory of the session arrived.
    #[must_use]
    pub fn needs_pool(&self, inventory: &[InventoryItem]) -> bool {
        !self.pool_loaded || (!inventory.is_empty() && !self.seeded_from_inventory)
    }

    #[must_use]
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::InventoryChanged(inventory) => {
                self.inventory = inventory;
                self.rerank();
            }
            Action::FetchStarted(ticket) => {
                // Newer fetch supersedes anything in flight
                self.latest_ticket = self.latest_ticket.max(ticket);
                self.loading = true;
                self.error = None;
                self.advisory = None;
            }
            Action::PoolLoaded {
                ticket,
                origin,
                outcome,
            } => {
                if self.is_stale(ticket, "pool") {
                    return self;
                }
                // Accept the pool
                self.loading = false;
                self.pool_loaded = true;
                self.pool = outcome.recipes;
                self.advisory = outcome.advisory;
                // Inventory pools show the fridge list; searches leave it
                match origin {
                    PoolOrigin::Inventory => {
                        if !self.inventory.is_empty() {
                            self.seeded_from_inventory = true;
                            self.filter = RecipeFilter::Fridge;
                        }
                    }
                    PoolOrigin::Search(_) => {
                        if self.filter == RecipeFilter::Fridge {
                            self.filter = RecipeFilter::All;
                        }
                    }
                }
                self.rerank();
            }
            Action::SearchFailed { ticket, message } => {
                if self.is_stale(ticket, "search failure") {
                    return self;
                }
                self.loading = false;
                self.error = Some(message);
            }
            Action::FilterSelected(filter) => self.filter = filter,
            Action::SearchTextChanged(text) => self.search_text = text,
        }
        self
    }

    fn is_stale(&mut self, ticket: FetchTicket, what: &str) -> bool {
        if ticket < self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket.0,
                "Discarding superseded {what}"
            );
            return true;
        }
        // A ticket newer than any seen becomes the latest
        self.latest_ticket = ticket;
        false
    }

    fn rerank(&mut self) {
        self.ranked = self.engine.rank(&self.pool, &self.inventory);
    }

    /// The list the UI should show right now
    #[must_use]
    pub fn visible(&self) -> Vec<&Recipe> {
        super::view::visible_list(&self.pool, &self.ranked, self.filter, &self.search_text)
    }

    #[must_use]
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    #[must_use]
    pub fn pool(&self) -> &[Recipe] {
        &self.pool
    }

    /// The "cook with what you have" list
    #[must_use]
    pub fn ranked(&self) -> &[RankedRecipe] {
        &self.ranked
    }

    #[must_use]
    pub fn filter(&self) -> RecipeFilter {
        self.filter
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set when the last manual search failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set when the last pool came back empty
    #[must_use]
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fridge(names: &[&str]) -> Vec<InventoryItem> {
        names.iter().map(|n| InventoryItem::named(*n)).collect()
    }

    fn outcome(recipes: Vec<Recipe>) -> PoolOutcome {
        PoolOutcome {
            lookups: 1,
            recipes,
            ..PoolOutcome::default()
        }
    }

    fn load(state: SessionState, origin: PoolOrigin, recipes: Vec<Recipe>) -> SessionState {
        let ticket = state.next_ticket();
        state
            .reduce(Action::FetchStarted(ticket))
            .reduce(Action::PoolLoaded {
                ticket,
                origin,
                outcome: outcome(recipes),
            })
    }

    fn chicken_pool() -> Vec<Recipe> {
        vec![
            Recipe::new("A", "Chicken Rice").with_ingredient_names(&["Chicken", "Garlic", "Rice"]),
            Recipe::new("B", "Beef Stew").with_ingredient_names(&["Beef", "Onion"]),
        ]
    }

    #[test]
    fn test_inventory_pool_switches_to_fridge() {
        let state = SessionState::new().reduce(Action::InventoryChanged(fridge(&["Chicken", "Rice"])));
        let state = load(state, PoolOrigin::Inventory, chicken_pool());

        assert_eq!(state.filter(), RecipeFilter::Fridge);
        let visible: Vec<&str> = state.visible().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(visible, vec!["A"]);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_inventory_change_reranks() {
        let state = SessionState::new().reduce(Action::InventoryChanged(fridge(&["Chicken"])));
        let state = load(state, PoolOrigin::Inventory, chicken_pool());
        assert_eq!(state.ranked().len(), 1);

        let state = state.reduce(Action::InventoryChanged(fridge(&["Chicken", "Beef"])));
        assert_eq!(state.ranked().len(), 2);

        // Emptying the fridge empties the ranked list
        let state = state.reduce(Action::InventoryChanged(Vec::new()));
        assert!(state.ranked().is_empty());
        assert!(state.visible().is_empty());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let state = SessionState::new().reduce(Action::InventoryChanged(fridge(&["Chicken"])));

        let slow = state.next_ticket();
        let state = state.reduce(Action::FetchStarted(slow));
        let fast = state.next_ticket();
        let state = state.reduce(Action::FetchStarted(fast));

        let state = state.reduce(Action::PoolLoaded {
            ticket: fast,
            origin: PoolOrigin::Inventory,
            outcome: outcome(vec![Recipe::new("fresh", "Chicken Soup").with_ingredient_names(&["Chicken"])]),
        });
        // Arrives after the newer fetch was applied
        let state = state.reduce(Action::PoolLoaded {
            ticket: slow,
            origin: PoolOrigin::Inventory,
            outcome: outcome(vec![Recipe::new("stale", "Old Chicken").with_ingredient_names(&["Chicken"])]),
        });

        let pool: Vec<&str> = state.pool().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(pool, vec!["fresh"]);
    }

    #[test]
    fn test_search_leaves_fridge_filter() {
        let state = SessionState::new().reduce(Action::InventoryChanged(fridge(&["Chicken"])));
        let state = load(state, PoolOrigin::Inventory, chicken_pool());
        assert_eq!(state.filter(), RecipeFilter::Fridge);

        let state = load(
            state,
            PoolOrigin::Search("stew".to_string()),
            vec![Recipe::new("B", "Beef Stew")],
        );
        assert_eq!(state.filter(), RecipeFilter::All);
        assert_eq!(state.visible().len(), 1);
    }

    #[test]
    fn test_search_keeps_other_filters() {
        let state = SessionState::new().reduce(Action::FilterSelected(RecipeFilter::Fast));
        let state = load(
            state,
            PoolOrigin::Search("toast".to_string()),
            vec![Recipe::new("1", "Toast").with_times(2, 3)],
        );
        assert_eq!(state.filter(), RecipeFilter::Fast);
    }

    #[test]
    fn test_search_failure_distinct_from_empty() {
        let state = SessionState::new();
        let ticket = state.next_ticket();
        let failed = state
            .clone()
            .reduce(Action::FetchStarted(ticket))
            .reduce(Action::SearchFailed {
                ticket,
                message: "timeout".to_string(),
            });
        assert_eq!(failed.error(), Some("timeout"));

        let empty = load(state, PoolOrigin::Search("zzz".to_string()), Vec::new());
        assert!(empty.error().is_none());
        assert!(empty.visible().is_empty());
    }

    #[test]
    fn test_needs_pool() {
        let state = SessionState::new();
        assert!(state.needs_pool(&[]));

        // Fallback pool loaded for an empty fridge
        let state = load(state, PoolOrigin::Inventory, vec![Recipe::new("p", "Pasta")]);
        assert!(!state.needs_pool(&[]));
        assert!(state.needs_pool(&fridge(&["Chicken"])));

        let state = state.reduce(Action::InventoryChanged(fridge(&["Chicken"])));
        let state = load(state, PoolOrigin::Inventory, chicken_pool());
        assert!(!state.needs_pool(&fridge(&["Chicken", "Rice"])));
    }

    #[test]
    fn test_filter_and_search_text() {
        let state = load(
            SessionState::new(),
            PoolOrigin::Search(String::new()),
            vec![
                Recipe::new("1", "Pasta Carbonara").with_times(10, 15),
                Recipe::new("2", "Slow Pasta Bake").with_times(30, 60),
            ],
        );
        let state = state
            .reduce(Action::SearchTextChanged("pasta".to_string()))
            .reduce(Action::FilterSelected(RecipeFilter::Fast));

        let titles: Vec<&str> = state.visible().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Pasta Carbonara"]);
        assert_eq!(state.search_text(), "pasta");
    }
}
