//! Pure client-side product filtering.
//!
//! A filter is a conjunction of optional criteria evaluated against the
//! already-fetched catalog. It lives in `core` (zero internal deps) so the
//! listing-page handler and the interactive browse controller apply search
//! input with identical semantics.

use crate::types::Product;

/// Optional product criteria combined as a conjunction.
///
/// Absent criteria are vacuously satisfied; a default filter matches every
/// product. Evaluation never errors: criteria that cannot match anything
/// (an unknown category, an inverted price range) simply yield an empty
/// result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Free-text query matched case-insensitively against title and
    /// description. Whitespace-only text imposes no constraint.
    pub query: Option<String>,
    /// Exact category match, case-sensitive in the store's own casing.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Whether the filter imposes no constraint at all.
    ///
    /// A whitespace-only query counts as absent.
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(|q| q.trim().is_empty())
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Whether a single product satisfies every present criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(query) = self.query.as_deref() {
            let needle = query.trim();
            if !needle.is_empty() {
                let needle = needle.to_lowercase();
                let in_title = product.title.to_lowercase().contains(&needle);
                let in_description = product.description.to_lowercase().contains(&needle);
                if !in_title && !in_description {
                    return false;
                }
            }
        }

        if let Some(category) = self.category.as_deref() {
            if product.category != category {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }

        true
    }

    /// Filter a product list, preserving input order.
    ///
    /// Returns exactly the products for which [`matches`](Self::matches)
    /// holds, in their original order, each at most once.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}
