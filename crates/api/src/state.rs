use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitrine_fakestore::FakeStoreClient;

use crate::cache::CatalogCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// HTTP client for the upstream store API.
    pub store: Arc<FakeStoreClient>,
    /// Cached catalog snapshot shared by page handlers and browse sessions.
    pub catalog: Arc<CatalogCache>,
    /// Cancelled on shutdown; browse sessions derive their lifetimes from it.
    pub shutdown: CancellationToken,
}
