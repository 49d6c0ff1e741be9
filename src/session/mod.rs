//! Recipe view session: filter/search composition and the session driver.
//!
//! - [`visible_list`]: Pure composition of pool, ranked list, filter and search text
//! - [`SessionState`]: Explicit state changed only through a reducer
//! - [`RecipeSession`]: Async driver that runs fetches against a
//!   [`RecipeSource`] and feeds the results back through the reducer
//!
//! Fetches are tagged with a [`FetchTicket`]. When two fetches overlap, only the
//! one issued last is applied, whichever finishes first.
//!
//! [`visible_list`]: view::visible_list
//! [`SessionState`]: state::SessionState
//! [`FetchTicket`]: state::FetchTicket

pub mod state;
pub mod view;

use futures::future::{BoxFuture, FutureExt};

use crate::catalog::source::RecipeSource;
use crate::core::inventory::InventoryItem;
use crate::core::recipe::Recipe;
use crate::core::types::{PoolOrigin, RecipeFilter};
use crate::matching::engine::RankingEngine;
use crate::matching::pool::{PoolBuilder, PoolOutcome};
use state::{Action, SessionState};

/// Search box text longer than this many characters also runs a remote search
pub const REMOTE_SEARCH_MIN_CHARS: usize = 3;

/// A fetch in flight; resolves to the action that applies its result
pub type PendingFetch = BoxFuture<'static, Action>;

/// Drives a [`SessionState`] against a recipe source
pub struct RecipeSession<S> {
    builder: PoolBuilder<S>,
    state: SessionState,
}

impl<S: RecipeSource + 'static> RecipeSession<S> {
    pub fn new(builder: PoolBuilder<S>) -> Self {
        Self::with_engine(builder, RankingEngine::new())
    }

    pub fn with_engine(builder: PoolBuilder<S>, engine: RankingEngine) -> Self {
        Self {
            builder,
            state: SessionState::with_engine(engine),
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Feed an action through the reducer
    pub fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Record the inventory and start a pool fetch for it.
    ///
    /// The returned future owns everything it needs; await it (possibly while
    /// other fetches run) and pass its action to [`RecipeSession::apply`].
    pub fn begin_load(&mut self, inventory: Vec<InventoryItem>) -> PendingFetch {
        // Rerank right away against the current pool
        self.apply(Action::InventoryChanged(inventory.clone()));
        let ticket = self.state.next_ticket();
        self.apply(Action::FetchStarted(ticket));

        // The future must not borrow the session
        let builder = self.builder.clone();
        async move {
            let outcome = builder.build_pool(&inventory).await;
            Action::PoolLoaded {
                ticket,
                origin: PoolOrigin::Inventory,
                outcome,
            }
        }
        .boxed()
    }

    /// Start a manual search that will replace the pool
    pub fn begin_search(&mut self, term: &str) -> PendingFetch {
        let ticket = self.state.next_ticket();
        self.apply(Action::FetchStarted(ticket));

        let builder = self.builder.clone();
        // Owned, for the 'static future
        let term = term.trim().to_string();
        async move {
            match builder.search(&term).await {
                // An empty result is not a failure
                Ok(recipes) => {
                    let advisory = recipes
                        .is_empty()
                        .then(|| format!("No recipes found for '{term}'"));
                    Action::PoolLoaded {
                        ticket,
                        outcome: PoolOutcome {
                            recipes,
                            lookups: 1,
                            failed_lookups: 0,
                            advisory,
                        },
                        origin: PoolOrigin::Search(term),
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Manual recipe search failed");
                    Action::SearchFailed {
                        ticket,
                        message: e.to_string(),
                    }
                }
            }
        }
        .boxed()
    }

    /// The fridge changed: rerank, fetching a new pool first if one is due
    pub async fn load_from_inventory(&mut self, inventory: Vec<InventoryItem>) {
        // Fetch only for a first pool or the first non-empty fridge
        if self.state.needs_pool(&inventory) {
            let pending = self.begin_load(inventory);
            let action = pending.await;
            self.apply(action);
        } else {
            self.apply(Action::InventoryChanged(inventory));
        }
    }

    /// Rebuild the pool from the current inventory
    pub async fn refresh(&mut self) {
        let inventory = self.state.inventory().to_vec();
        let pending = self.begin_load(inventory);
        let action = pending.await;
        self.apply(action);
    }

    /// Replace the pool with a manual search; failures land in `state().error()`
    pub async fn search(&mut self, term: &str) {
        let pending = self.begin_search(term);
        let action = pending.await;
        self.apply(action);
    }

    pub fn set_filter(&mut self, filter: RecipeFilter) {
        self.apply(Action::FilterSelected(filter));
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.apply(Action::SearchTextChanged(text.into()));
    }

    /// Search box input: filters locally, and once the text is long enough
    /// also replaces the pool with a manual search for it
    pub async fn type_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let remote = text.trim().chars().count() >= REMOTE_SEARCH_MIN_CHARS;
        self.set_search_text(text.clone());
        if remote {
            self.search(&text).await;
        }
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Recipe> {
        self.state.visible()
    }
}
