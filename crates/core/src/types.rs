//! Product catalog model, mirroring the store API wire shape.

use serde::{Deserialize, Serialize};

/// Product identifiers are assigned by the upstream store API.
pub type ProductId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Product model
// ---------------------------------------------------------------------------

/// Aggregate customer rating attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score on the store's 0.0 - 5.0 scale.
    pub rate: f64,
    /// Number of ratings behind the average.
    pub count: u32,
}

/// A single catalog product as served by the store API.
///
/// Products are immutable once fetched: a render cycle fetches, renders,
/// and discards them. There is no local mutation or persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency. Non-negative.
    pub price: f64,
    pub description: String,
    /// One of the small fixed vocabulary the category-list endpoint returns.
    pub category: String,
    /// URI of the product image.
    pub image: String,
    pub rating: Rating,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_store_wire_shape() {
        let raw = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://example.test/81fPKd-2AYL.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(raw).expect("valid product JSON");
        assert_eq!(product.id, 1);
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn product_roundtrips_through_json() {
        let product = Product {
            id: 7,
            title: "White Gold Ring".to_string(),
            price: 9.99,
            description: "Classic band".to_string(),
            category: "jewelery".to_string(),
            image: "https://example.test/ring.jpg".to_string(),
            rating: Rating {
                rate: 3.0,
                count: 400,
            },
        };

        let json = serde_json::to_string(&product).expect("serializes");
        let back: Product = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, product);
    }
}
