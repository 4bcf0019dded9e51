pub mod health;
pub mod pages;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /browse/ws                interactive browse session WebSocket
///
/// /pages/catalog            catalog page view model (GET)
/// /pages/products/{id}      product detail page view model (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint for interactive browse sessions.
        .route("/browse/ws", get(ws::browse_ws_handler))
        // Server-assembled page view models.
        .merge(pages::router())
}
