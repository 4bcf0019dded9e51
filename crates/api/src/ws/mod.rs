//! WebSocket surface for interactive browse sessions.
//!
//! Wire frames and the HTTP upgrade handler used by Axum routes. Session
//! logic itself lives in `vitrine_browse`.

mod handler;
pub mod messages;

pub use handler::browse_ws_handler;
