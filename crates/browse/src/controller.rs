//! Pure state machine behind the interactive catalog page.
//!
//! The controller consumes discrete UI and fetch events and returns the
//! effects its host must execute (arm the debounce timer, fetch a
//! category, reload the page). It performs no I/O and holds no timers
//! itself, which keeps every transition -- including the race between
//! overlapping category fetches -- synchronously testable.

use serde::Serialize;

use vitrine_core::{Product, ProductFilter};
use vitrine_fakestore::ApiError;

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// A discrete input to the controller.
#[derive(Debug, Clone)]
pub enum BrowseEvent {
    /// The search input changed.
    SearchChanged { text: String },
    /// A category was picked from the selector. Blank input is treated
    /// as [`BrowseEvent::CategoryCleared`].
    CategorySelected { category: String },
    /// The category selection was cleared back to the full catalog.
    CategoryCleared,
    /// The retry affordance was activated.
    RetryClicked,
    /// The debounce window elapsed with no further keystrokes.
    DebounceElapsed,
    /// A category fetch completed. `fetch_id` ties the settlement to the
    /// [`BrowseEffect::FetchCategory`] that started it.
    FetchSettled {
        fetch_id: u64,
        category: String,
        outcome: Result<Vec<Product>, ApiError>,
    },
}

/// An action the host must execute on the controller's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseEffect {
    /// (Re)start the debounce window. Any previously armed window is dead.
    RestartDebounce,
    /// Fetch the products of `category` and settle with `fetch_id`.
    FetchCategory { fetch_id: u64, category: String },
    /// Ask the client to reload the page. Emitted only when retrying with
    /// no failed category to refetch.
    ReloadPage,
}

// ---------------------------------------------------------------------------
// Phases and view
// ---------------------------------------------------------------------------

/// The interaction phase the page is in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BrowsePhase {
    /// Products are shown and every interaction is live.
    Idle,
    /// A category fetch is in flight.
    LoadingCategory { category: String },
    /// The last fetch failed; a retry affordance is shown while the
    /// previously displayed products stay on screen.
    Error {
        /// Category whose fetch failed. `None` when the failure did not
        /// come from a category fetch, in which case retry reloads the
        /// page instead of refetching.
        category: Option<String>,
        message: String,
    },
}

/// Snapshot of everything the client renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseView {
    /// Products currently visible, already filtered by the applied query.
    pub products: Vec<Product>,
    /// Category vocabulary for the selector.
    pub categories: Vec<String>,
    /// The query last applied by an elapsed debounce window.
    pub query: String,
    /// Currently selected category, `None` for the full catalog.
    pub selected_category: Option<String>,
    pub phase: BrowsePhase,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Event-driven state machine for one catalog page.
///
/// Category selection swaps the product scope via a fetch; search input
/// filters the current scope locally after a debounce window; a failed
/// fetch keeps the last shown list and offers retry. Overlapping fetches
/// are resolved by generation: each fetch effect carries a fresh id and
/// only a settlement matching the id currently in flight is applied.
pub struct BrowseController {
    /// Full catalog the page was rendered with. Clearing the category
    /// restores this without a network round trip.
    catalog: Vec<Product>,
    categories: Vec<String>,
    /// Products scoped by the selected category (the catalog when none).
    scope: Vec<Product>,
    /// `scope` with the applied query, i.e. what the user sees.
    shown: Vec<Product>,
    /// Query last applied by an elapsed debounce window.
    query: String,
    /// Latest typed text, not applied until the window elapses.
    pending_query: Option<String>,
    selected_category: Option<String>,
    phase: BrowsePhase,
    next_fetch_id: u64,
    /// Generation id of the fetch allowed to settle, if any.
    in_flight: Option<u64>,
}

impl BrowseController {
    /// Seed a controller from a server-rendered catalog page.
    pub fn new(catalog: Vec<Product>, categories: Vec<String>) -> Self {
        let scope = catalog.clone();
        let shown = catalog.clone();
        Self {
            catalog,
            categories,
            scope,
            shown,
            query: String::new(),
            pending_query: None,
            selected_category: None,
            phase: BrowsePhase::Idle,
            next_fetch_id: 0,
            in_flight: None,
        }
    }

    /// Start in the error phase when the initial catalog never arrived.
    /// Retry then asks the client to reload the page.
    pub fn unavailable(message: impl Into<String>) -> Self {
        let mut controller = Self::new(Vec::new(), Vec::new());
        controller.phase = BrowsePhase::Error {
            category: None,
            message: message.into(),
        };
        controller
    }

    /// Snapshot the renderable state.
    pub fn view(&self) -> BrowseView {
        BrowseView {
            products: self.shown.clone(),
            categories: self.categories.clone(),
            query: self.query.clone(),
            selected_category: self.selected_category.clone(),
            phase: self.phase.clone(),
        }
    }

    /// Apply one event and return the effects the host must execute.
    pub fn handle(&mut self, event: BrowseEvent) -> Vec<BrowseEffect> {
        match event {
            BrowseEvent::SearchChanged { text } => {
                self.pending_query = Some(text);
                vec![BrowseEffect::RestartDebounce]
            }

            BrowseEvent::DebounceElapsed => {
                if let Some(text) = self.pending_query.take() {
                    self.query = text;
                    self.refresh_shown();
                }
                Vec::new()
            }

            BrowseEvent::CategorySelected { category } => {
                let trimmed = category.trim();
                if trimmed.is_empty() {
                    return self.handle(BrowseEvent::CategoryCleared);
                }
                let category = trimmed.to_string();
                let fetch_id = self.begin_fetch();
                self.phase = BrowsePhase::LoadingCategory {
                    category: category.clone(),
                };
                vec![BrowseEffect::FetchCategory { fetch_id, category }]
            }

            BrowseEvent::CategoryCleared => {
                // A late settlement must not clobber the restored list.
                self.in_flight = None;
                self.selected_category = None;
                self.scope = self.catalog.clone();
                self.phase = BrowsePhase::Idle;
                self.refresh_shown();
                Vec::new()
            }

            BrowseEvent::RetryClicked => match &self.phase {
                BrowsePhase::Error {
                    category: Some(category),
                    ..
                } => {
                    let category = category.clone();
                    let fetch_id = self.begin_fetch();
                    self.phase = BrowsePhase::LoadingCategory {
                        category: category.clone(),
                    };
                    vec![BrowseEffect::FetchCategory { fetch_id, category }]
                }
                BrowsePhase::Error { category: None, .. } => vec![BrowseEffect::ReloadPage],
                // Retry outside an error phase is a no-op.
                _ => Vec::new(),
            },

            BrowseEvent::FetchSettled {
                fetch_id,
                category,
                outcome,
            } => {
                if self.in_flight != Some(fetch_id) {
                    tracing::debug!(fetch_id, category = %category, "Dropping stale fetch settlement");
                    return Vec::new();
                }
                self.in_flight = None;

                match outcome {
                    Ok(products) => {
                        self.selected_category = Some(category);
                        self.scope = products;
                        self.phase = BrowsePhase::Idle;
                        self.refresh_shown();
                    }
                    Err(err) => {
                        // `shown` keeps the last successfully displayed list.
                        self.phase = BrowsePhase::Error {
                            category: Some(category),
                            message: err.to_string(),
                        };
                    }
                }
                Vec::new()
            }
        }
    }

    // ---- private helpers ----

    /// Recompute `shown` from the current scope and applied query.
    fn refresh_shown(&mut self) {
        let filter = ProductFilter {
            query: Some(self.query.clone()),
            ..Default::default()
        };
        self.shown = filter.apply(&self.scope);
    }

    /// Allocate the next fetch generation and mark it in flight.
    fn begin_fetch(&mut self) -> u64 {
        let id = self.next_fetch_id;
        self.next_fetch_id += 1;
        self.in_flight = Some(id);
        id
    }
}
