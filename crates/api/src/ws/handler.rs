use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use vitrine_browse::{BrowseController, BrowseSession, BrowseSessionConfig};

use crate::state::AppState;
use crate::ws::messages::{ClientMessage, ServerMessage};

/// HTTP handler that upgrades the connection to a browse session WebSocket.
///
/// After the upgrade, one [`BrowseSession`] task serves the connection for
/// its lifetime.
pub async fn browse_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single browse session connection after upgrade.
///
/// Seeds a controller from the cached catalog snapshot and spawns the
/// session task, then:
///   1. Spawns a sender task that forwards session updates to the sink.
///   2. Decodes inbound frames into session events on the current task.
///   3. Tears the session down on disconnect or server shutdown.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Browse session connected");

    let controller = match state.catalog.snapshot().await {
        Ok(snapshot) => {
            BrowseController::new(snapshot.products.clone(), snapshot.categories.clone())
        }
        Err(err) => {
            tracing::warn!(conn_id = %conn_id, error = %err, "Browse session started without a catalog");
            BrowseController::unavailable("The catalog is currently unavailable")
        }
    };

    let cancel = state.shutdown.child_token();
    let config = BrowseSessionConfig {
        debounce: Duration::from_millis(state.config.search_debounce_ms),
    };
    let BrowseSession {
        events,
        mut updates,
    } = BrowseSession::spawn(controller, Arc::clone(&state.store), config, cancel.clone());

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward session updates to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            let frame = ServerMessage::from(update);
            let payload = match serde_json::to_string(&frame) {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::error!(conn_id = %sender_conn_id, error = %err, "Frame serialization failed");
                    continue;
                }
            };
            if sink.send(Message::Text(payload.into())).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: decode inbound frames into session events.
    loop {
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            next = stream.next() => match next {
                Some(result) => result,
                None => break,
            },
        };

        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(frame) => {
                    if events.send(frame.into()).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::debug!(conn_id = %conn_id, error = %err, "Malformed client frame");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(conn_id = %conn_id, error = %err, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: end the session task and the sender.
    cancel.cancel();
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Browse session disconnected");
}
