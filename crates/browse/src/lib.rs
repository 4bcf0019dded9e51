//! Interactive catalog browsing: state machine and session host.
//!
//! [`BrowseController`] is the pure event-driven machine behind the catalog
//! page's search box and category selector. [`BrowseSession`] binds one
//! controller to the debounce timer and the store client for the lifetime
//! of a client connection, turning controller effects into fetches and
//! state changes into a stream of view updates.

pub mod controller;
pub mod session;

pub use controller::{BrowseController, BrowseEffect, BrowseEvent, BrowsePhase, BrowseView};
pub use session::{BrowseSession, BrowseSessionConfig, BrowseUpdate, SEARCH_DEBOUNCE};
