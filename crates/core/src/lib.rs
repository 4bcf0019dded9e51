//! Vitrine domain types and pure catalog logic.
//!
//! This crate holds what every other layer shares: the product model as
//! the store API serves it, and the client-side filter the listing page
//! and the interactive browse controller both evaluate. Zero internal
//! deps, no I/O.

pub mod filter;
pub mod types;

pub use filter::ProductFilter;
pub use types::{Product, ProductId, Rating, Timestamp};
