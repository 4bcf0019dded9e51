//! HTTP client for the public Fake Store API.
//!
//! Four read-only operations over [`reqwest`], every failure funneled into
//! the single [`ApiError`] shape. The client is stateless -- no retries, no
//! caching, no auth; revalidation policy belongs to the caller.

pub mod client;
pub mod error;

pub use client::FakeStoreClient;
pub use error::ApiError;
