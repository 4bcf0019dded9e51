//! Wire frames exchanged with a browse session client.
//!
//! Inbound frames mirror UI interactions; outbound frames carry view
//! snapshots. Both directions are tagged JSON.

use serde::{Deserialize, Serialize};
use vitrine_browse::{BrowseEvent, BrowseUpdate, BrowseView};

/// A frame received from the client.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The search input changed.
    Search { text: String },
    /// A category was picked from the selector.
    SelectCategory { category: String },
    /// The category selection was cleared.
    ClearCategory,
    /// The retry affordance was activated.
    Retry,
}

impl From<ClientMessage> for BrowseEvent {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::Search { text } => BrowseEvent::SearchChanged { text },
            ClientMessage::SelectCategory { category } => {
                BrowseEvent::CategorySelected { category }
            }
            ClientMessage::ClearCategory => BrowseEvent::CategoryCleared,
            ClientMessage::Retry => BrowseEvent::RetryClicked,
        }
    }
}

/// A frame pushed to the client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The visible state changed.
    View { view: BrowseView },
    /// The client should reload the page.
    Reload,
}

impl From<BrowseUpdate> for ServerMessage {
    fn from(update: BrowseUpdate) -> Self {
        match update {
            BrowseUpdate::View(view) => ServerMessage::View { view },
            BrowseUpdate::Reload => ServerMessage::Reload,
        }
    }
}
