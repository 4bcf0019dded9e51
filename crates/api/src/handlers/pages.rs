//! Handlers assembling page view models for the storefront.
//!
//! Each endpoint returns everything one page needs in a single response, so
//! a client renders without issuing follow-up requests.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::{Product, ProductFilter, ProductId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query parameter types
// ---------------------------------------------------------------------------

/// Query parameters for the catalog page.
#[derive(Debug, Deserialize)]
pub struct CatalogPageParams {
    /// Case-insensitive substring matched against titles and descriptions.
    pub q: Option<String>,
    /// Exact category name, in the store's own casing.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// View model for the catalog page.
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    /// Products matching the requested filters, in catalog order.
    pub products: Vec<Product>,
    /// Every known category, for the filter sidebar.
    pub categories: Vec<String>,
    /// Number of products after filtering.
    pub total: usize,
    /// When the underlying catalog snapshot was fetched.
    pub generated_at: Timestamp,
}

/// View model for the product detail page.
#[derive(Debug, Serialize)]
pub struct ProductDetailPage {
    pub product: Product,
}

// ---------------------------------------------------------------------------
// Catalog page
// ---------------------------------------------------------------------------

/// GET /pages/catalog?q=&category=&min_price=&max_price=
///
/// Assemble the catalog page: the product grid after applying the requested
/// filters, plus the category list for the sidebar. Filters are evaluated
/// against the cached snapshot; no upstream call is made per filter change.
pub async fn catalog_page(
    State(state): State<AppState>,
    Query(params): Query<CatalogPageParams>,
) -> AppResult<impl IntoResponse> {
    let snapshot = state.catalog.snapshot().await?;

    let filter = ProductFilter {
        query: params.q,
        category: params.category,
        min_price: params.min_price,
        max_price: params.max_price,
    };

    if let Some(category) = filter.category.as_deref() {
        if !snapshot.categories.iter().any(|known| known == category) {
            tracing::debug!(category = %category, "Catalog page filtered by unknown category");
        }
    }

    let products = if filter.is_empty() {
        snapshot.products.clone()
    } else {
        filter.apply(&snapshot.products)
    };
    let total = products.len();

    Ok(Json(DataResponse {
        data: CatalogPage {
            products,
            categories: snapshot.categories.clone(),
            total,
            generated_at: snapshot.fetched_at,
        },
    }))
}

// ---------------------------------------------------------------------------
// Product detail page
// ---------------------------------------------------------------------------

/// GET /pages/products/{id}
///
/// Assemble the product detail page. Every upstream failure surfaces as
/// not-found; anything other than an upstream 404 is also logged.
pub async fn product_detail_page(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> AppResult<impl IntoResponse> {
    match state.store.product(id).await {
        Ok(product) => Ok(Json(DataResponse {
            data: ProductDetailPage { product },
        })),
        Err(err) => {
            if !err.is_not_found() {
                tracing::warn!(product_id = id, error = %err, "Product fetch failed");
            }
            Err(AppError::NotFound("Product"))
        }
    }
}
