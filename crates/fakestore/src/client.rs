//! REST client for the store's product endpoints.
//!
//! Wraps the four public read-only routes (catalog, single product,
//! category vocabulary, category listing) using [`reqwest`]. Each
//! operation is one GET, a status check, and a JSON decode.

use serde::de::DeserializeOwned;

use vitrine_core::{Product, ProductId};

use crate::error::ApiError;

/// HTTP client for a single store API origin.
///
/// Holds no cache and performs no retries; the base origin is injected at
/// construction so tests can point it at a local mock server.
pub struct FakeStoreClient {
    client: reqwest::Client,
    base_url: String,
}

impl FakeStoreClient {
    /// Create a client for a store API origin.
    ///
    /// * `base_url` - Base HTTP origin, e.g. `https://fakestoreapi.com`.
    ///   A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling across consumers).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the full product catalog.
    ///
    /// Sends a `GET /products` request.
    pub async fn all_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_json("/products", &["products"]).await
    }

    /// Fetch a single product by id.
    ///
    /// Sends a `GET /products/{id}` request. Ids are positive; zero or
    /// negative ids fail immediately without touching the network. A
    /// missing product surfaces as `status: Some(404)`.
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let endpoint = format!("/products/{id}");
        if id < 1 {
            return Err(ApiError::precondition(
                endpoint,
                format!("Product id must be positive, got {id}"),
            ));
        }
        self.get_json(&endpoint, &["products", &id.to_string()])
            .await
    }

    /// Fetch the category vocabulary.
    ///
    /// Sends a `GET /products/categories` request.
    pub async fn categories(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/products/categories", &["products", "categories"])
            .await
    }

    /// Fetch the products belonging to one category.
    ///
    /// Sends a `GET /products/category/{category}` request with the
    /// category encoded as a single path segment (store categories contain
    /// spaces and apostrophes). Blank names fail immediately without a
    /// request; an unknown category surfaces as `status: Some(404)`.
    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            return Err(ApiError::precondition(
                "/products/category/",
                "Category name must not be blank",
            ));
        }
        let endpoint = format!("/products/category/{trimmed}");
        self.get_json(&endpoint, &["products", "category", trimmed])
            .await
    }

    // ---- private helpers ----

    /// Build the request URL for a sequence of path segments, leaving
    /// percent-encoding of each segment to [`reqwest::Url`].
    fn endpoint_url(&self, endpoint: &str, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ApiError::precondition(
                endpoint,
                format!("Invalid store API base URL '{}': {e}", self.base_url),
            )
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::precondition(
                    endpoint,
                    format!("Store API base URL '{}' cannot carry a path", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Perform the GET and decode a successful JSON body into `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        segments: &[&str],
    ) -> Result<T, ApiError> {
        let url = self.endpoint_url(endpoint, segments)?;
        tracing::debug!(endpoint, "Requesting store API");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, &e))?;
        let response = Self::ensure_success(endpoint, response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::transport(endpoint, &e))
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`ApiError`] carrying the status and
    /// body text on failure.
    async fn ensure_success(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::status(endpoint, status.as_u16(), &body));
        }
        Ok(response)
    }
}
