//! HTTP server for the storefront.
//!
//! Serves pre-assembled page view models over REST and hosts interactive
//! browse sessions over WebSocket. Everything here is exported so that
//! integration tests can assemble the full application without binding a
//! socket.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
