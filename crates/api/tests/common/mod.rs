//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use vitrine_api::cache::CatalogCache;
use vitrine_api::config::ServerConfig;
use vitrine_api::router::build_app_router;
use vitrine_api::state::AppState;
use vitrine_fakestore::FakeStoreClient;

/// Build a test `ServerConfig` pointing the store client at `store_url`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(store_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_api_url: store_url.to_string(),
        catalog_revalidate_secs: 3600,
        search_debounce_ms: 300,
    }
}

/// Build the full application router against a store at `store_url`.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store_url: &str) -> Router {
    let config = test_config(store_url);

    let store = Arc::new(FakeStoreClient::new(config.store_api_url.clone()));
    let catalog = Arc::new(CatalogCache::new(
        Arc::clone(&store),
        config.catalog_revalidate_secs,
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        catalog,
        shutdown: CancellationToken::new(),
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app and return the raw response.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// JSON for one product in the store's wire shape.
pub fn product_json(
    id: i64,
    title: &str,
    price: f64,
    category: &str,
    description: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": description,
        "category": category,
        "image": format!("https://img.example/{id}.png"),
        "rating": { "rate": 4.2, "count": 120 }
    })
}

/// Register catalog mocks (product list + category list) on `server`.
///
/// The fixture catalog has three products across two categories, enough to
/// exercise every filter dimension.
pub async fn mock_catalog(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let products = server
        .mock_async(|when, then| {
            when.method(GET).path("/products");
            then.status(200).json_body(json!([
                product_json(
                    1,
                    "Fjallraven Backpack",
                    109.95,
                    "men's clothing",
                    "Fits 15 inch laptops, everyday carry"
                ),
                product_json(
                    2,
                    "Portable SSD 1TB",
                    109.0,
                    "electronics",
                    "Easy upgrade for faster boot and loading"
                ),
                product_json(
                    3,
                    "Gaming Monitor",
                    999.99,
                    "electronics",
                    "49 inch super ultrawide curved screen"
                ),
            ]));
        })
        .await;

    let categories = server
        .mock_async(|when, then| {
            when.method(GET).path("/products/categories");
            then.status(200)
                .json_body(json!(["men's clothing", "electronics"]));
        })
        .await;

    (products, categories)
}
