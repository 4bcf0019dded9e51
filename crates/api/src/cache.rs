//! Cached snapshot of the store catalog.
//!
//! Page handlers and browse sessions read the full product list and the
//! category list far more often than the upstream data changes. The cache
//! fetches both once, serves that snapshot for a revalidation window, and
//! refetches lazily the first time someone asks after the window expires.
//! When a refetch fails and an older snapshot exists, the stale snapshot is
//! served while the upstream recovers.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use vitrine_core::{Product, Timestamp};
use vitrine_fakestore::{ApiError, FakeStoreClient};

/// One consistent view of the catalog: every product plus the category list,
/// fetched together.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    /// When this snapshot was fetched from the upstream store.
    pub fetched_at: Timestamp,
}

/// Lazily revalidated cache over the store catalog.
pub struct CatalogCache {
    store: Arc<FakeStoreClient>,
    revalidate: TimeDelta,
    inner: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogCache {
    /// Create a cache whose snapshots go stale `revalidate_secs` seconds
    /// after being fetched. `0` refetches on every request.
    pub fn new(store: Arc<FakeStoreClient>, revalidate_secs: u64) -> Self {
        let revalidate = i64::try_from(revalidate_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);
        Self {
            store,
            revalidate,
            inner: RwLock::new(None),
        }
    }

    /// Return the current snapshot, refetching first if it is missing or
    /// stale.
    ///
    /// A failed refetch falls back to the previous snapshot when one exists;
    /// the error is propagated only when there is nothing cached to serve.
    pub async fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, ApiError> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }
        self.refresh().await
    }

    /// Age of the cached snapshot, if one has been loaded.
    pub async fn age(&self) -> Option<TimeDelta> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .map(|snapshot| Utc::now().signed_duration_since(snapshot.fetched_at))
    }

    // ---- private helpers ----

    async fn fresh(&self) -> Option<Arc<CatalogSnapshot>> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|snapshot| !self.is_stale(snapshot))
            .cloned()
    }

    async fn refresh(&self) -> Result<Arc<CatalogSnapshot>, ApiError> {
        let mut guard = self.inner.write().await;

        // Another task may have refreshed while we waited for the lock.
        if let Some(snapshot) = guard.as_ref().filter(|snapshot| !self.is_stale(snapshot)) {
            return Ok(Arc::clone(snapshot));
        }

        match tokio::try_join!(self.store.all_products(), self.store.categories()) {
            Ok((products, categories)) => {
                let snapshot = Arc::new(CatalogSnapshot {
                    products,
                    categories,
                    fetched_at: Utc::now(),
                });
                *guard = Some(Arc::clone(&snapshot));
                tracing::info!(
                    products = snapshot.products.len(),
                    categories = snapshot.categories.len(),
                    "Catalog snapshot refreshed"
                );
                Ok(snapshot)
            }
            Err(err) => match guard.as_ref() {
                Some(stale) => {
                    tracing::warn!(error = %err, "Catalog refresh failed, serving stale snapshot");
                    Ok(Arc::clone(stale))
                }
                None => Err(err),
            },
        }
    }

    fn is_stale(&self, snapshot: &CatalogSnapshot) -> bool {
        Utc::now().signed_duration_since(snapshot.fetched_at) >= self.revalidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn product_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": 9.99,
            "description": "",
            "category": "electronics",
            "image": format!("https://img.example/{id}.png"),
            "rating": { "rate": 4.0, "count": 10 }
        })
    }

    fn cache_for(server: &MockServer, revalidate_secs: u64) -> CatalogCache {
        let store = Arc::new(FakeStoreClient::new(server.base_url()));
        CatalogCache::new(store, revalidate_secs)
    }

    async fn mock_catalog(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
        let products = server
            .mock_async(|when, then| {
                when.method(GET).path("/products");
                then.status(200)
                    .json_body(json!([product_json(1), product_json(2)]));
            })
            .await;
        let categories = server
            .mock_async(|when, then| {
                when.method(GET).path("/products/categories");
                then.status(200)
                    .json_body(json!(["electronics", "jewelery"]));
            })
            .await;
        (products, categories)
    }

    #[tokio::test]
    async fn first_snapshot_fetches_products_and_categories() {
        let server = MockServer::start_async().await;
        let (products, categories) = mock_catalog(&server).await;
        let cache = cache_for(&server, 3600);

        let snapshot = cache.snapshot().await.unwrap();

        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(snapshot.categories, vec!["electronics", "jewelery"]);
        products.assert_async().await;
        categories.assert_async().await;
    }

    #[tokio::test]
    async fn snapshot_is_reused_within_the_revalidation_window() {
        let server = MockServer::start_async().await;
        let (products, _categories) = mock_catalog(&server).await;
        let cache = cache_for(&server, 3600);

        let first = cache.snapshot().await.unwrap();
        let second = cache.snapshot().await.unwrap();

        assert_eq!(first.fetched_at, second.fetched_at);
        assert_eq!(products.hits_async().await, 1);
    }

    #[tokio::test]
    async fn zero_revalidation_refetches_on_every_request() {
        let server = MockServer::start_async().await;
        let (products, _categories) = mock_catalog(&server).await;
        let cache = cache_for(&server, 0);

        cache.snapshot().await.unwrap();
        cache.snapshot().await.unwrap();

        assert_eq!(products.hits_async().await, 2);
    }

    #[tokio::test]
    async fn failed_refresh_serves_the_stale_snapshot() {
        let server = MockServer::start_async().await;
        let (mut products, mut categories) = mock_catalog(&server).await;
        let cache = cache_for(&server, 0);

        let first = cache.snapshot().await.unwrap();

        products.delete_async().await;
        categories.delete_async().await;
        let outage = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500).body("upstream exploded");
            })
            .await;

        let second = cache.snapshot().await.unwrap();

        assert_eq!(second.fetched_at, first.fetched_at);
        assert_eq!(second.products.len(), 2);
        assert!(outage.hits_async().await >= 1);
    }

    #[tokio::test]
    async fn initial_fetch_failure_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(503).body("maintenance");
            })
            .await;
        let cache = cache_for(&server, 3600);

        let err = cache.snapshot().await.unwrap_err();

        assert_eq!(err.status, Some(503));
        assert!(cache.age().await.is_none());
    }
}
