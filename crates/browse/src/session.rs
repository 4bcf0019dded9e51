//! Async host binding one controller to timers and the store client.
//!
//! A session runs as a single task per client connection: UI events come
//! in over an mpsc channel, controller effects are executed (debounce
//! timer, category fetches), and every state change goes out as a
//! [`BrowseUpdate`]. Fetches run as cancellation-aware child tasks that
//! settle back into the session, so the controller's generation guard
//! decides races in one place. UI events and settlements arrive on
//! separate channels, which lets a disconnected client end the task
//! promptly even while a fetch is pending.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use vitrine_fakestore::FakeStoreClient;

use crate::controller::{BrowseController, BrowseEffect, BrowseEvent, BrowseView};

/// Default quiescence window applied to search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Capacity of the inbound UI event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the outbound update channel.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the internal fetch settlement channel. At most one fetch
/// generation is current at a time.
const SETTLEMENT_CHANNEL_CAPACITY: usize = 4;

/// Tunable parameters for a browse session.
pub struct BrowseSessionConfig {
    /// Quiescence window applied to search input before it is evaluated.
    pub debounce: Duration,
}

impl Default for BrowseSessionConfig {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// An update pushed to the connected client.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseUpdate {
    /// The visible state changed.
    View(BrowseView),
    /// The client should reload the page.
    Reload,
}

/// Channel pair for one spawned session task.
pub struct BrowseSession {
    /// Inbound UI events.
    pub events: mpsc::Sender<BrowseEvent>,
    /// Outbound updates. Closed when the session task exits.
    pub updates: mpsc::Receiver<BrowseUpdate>,
}

impl BrowseSession {
    /// Spawn the session task for `controller`.
    ///
    /// The current view is emitted immediately so the client starts
    /// synchronized. The task exits when `cancel` fires or when either
    /// end of the channel pair is dropped.
    pub fn spawn(
        controller: BrowseController,
        store: Arc<FakeStoreClient>,
        config: BrowseSessionConfig,
        cancel: CancellationToken,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (update_tx, update_rx) = mpsc::channel(UPDATE_CHANNEL_CAPACITY);
        let (settle_tx, settle_rx) = mpsc::channel(SETTLEMENT_CHANNEL_CAPACITY);

        let runtime = SessionRuntime {
            controller,
            store,
            config,
            cancel,
            events: event_rx,
            settlements: settle_rx,
            settle_tx,
            updates: update_tx,
            deadline: None,
            fetch_cancel: None,
        };
        tokio::spawn(runtime.run());

        Self {
            events: event_tx,
            updates: update_rx,
        }
    }
}

/// State owned by the spawned session task.
struct SessionRuntime {
    controller: BrowseController,
    store: Arc<FakeStoreClient>,
    config: BrowseSessionConfig,
    cancel: CancellationToken,
    events: mpsc::Receiver<BrowseEvent>,
    settlements: mpsc::Receiver<BrowseEvent>,
    /// Handed to fetch tasks for settling back into the session.
    settle_tx: mpsc::Sender<BrowseEvent>,
    updates: mpsc::Sender<BrowseUpdate>,
    /// Armed end of the debounce window, if any.
    deadline: Option<Instant>,
    /// Cancels the fetch task of the current generation.
    fetch_cancel: Option<CancellationToken>,
}

impl SessionRuntime {
    async fn run(mut self) {
        let mut last_view = self.controller.view();
        if self
            .updates
            .send(BrowseUpdate::View(last_view.clone()))
            .await
            .is_err()
        {
            return;
        }

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,

                _ = debounce_timer(self.deadline) => {
                    self.deadline = None;
                    if !self.dispatch(BrowseEvent::DebounceElapsed, &mut last_view).await {
                        break;
                    }
                }

                event = self.events.recv() => {
                    // `None` means the client side dropped its sender.
                    let Some(event) = event else { break };
                    if !self.dispatch(event, &mut last_view).await {
                        break;
                    }
                }

                settlement = self.settlements.recv() => {
                    let Some(settlement) = settlement else { break };
                    if !self.dispatch(settlement, &mut last_view).await {
                        break;
                    }
                }
            }
        }

        if let Some(fetch) = self.fetch_cancel.take() {
            fetch.cancel();
        }
        tracing::debug!("Browse session task exited");
    }

    /// Run one event through the controller, execute its effects, and
    /// push an update when the view changed. Returns `false` when the
    /// client side is gone and the task should stop.
    async fn dispatch(&mut self, event: BrowseEvent, last_view: &mut BrowseView) -> bool {
        for effect in self.controller.handle(event) {
            match effect {
                BrowseEffect::RestartDebounce => {
                    self.deadline = Some(Instant::now() + self.config.debounce);
                }
                BrowseEffect::FetchCategory { fetch_id, category } => {
                    self.start_fetch(fetch_id, category);
                }
                BrowseEffect::ReloadPage => {
                    if self.updates.send(BrowseUpdate::Reload).await.is_err() {
                        return false;
                    }
                }
            }
        }

        let view = self.controller.view();
        if view != *last_view {
            *last_view = view.clone();
            if self.updates.send(BrowseUpdate::View(view)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Spawn the fetch task for one generation. Any previous generation's
    /// task is cancelled.
    fn start_fetch(&mut self, fetch_id: u64, category: String) {
        if let Some(previous) = self.fetch_cancel.take() {
            previous.cancel();
        }
        let fetch_cancel = self.cancel.child_token();
        self.fetch_cancel = Some(fetch_cancel.clone());

        let store = Arc::clone(&self.store);
        let settle_tx = self.settle_tx.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = fetch_cancel.cancelled() => return,
                outcome = store.products_by_category(&category) => outcome,
            };
            let _ = settle_tx
                .send(BrowseEvent::FetchSettled {
                    fetch_id,
                    category,
                    outcome,
                })
                .await;
        });
    }
}

/// Sleep until the armed debounce deadline, or forever when none is armed.
async fn debounce_timer(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => future::pending::<()>().await,
    }
}
