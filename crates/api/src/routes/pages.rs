//! Route definitions for server-assembled page view models.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page view-model routes mounted at `/pages`.
///
/// ```text
/// GET  /pages/catalog           -> catalog_page
/// GET  /pages/products/{id}     -> product_detail_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages/catalog", get(pages::catalog_page))
        .route("/pages/products/{id}", get(pages::product_detail_page))
}
