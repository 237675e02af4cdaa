//! Coalesces bursts of state changes into a single save.

use std::sync::Arc;
use std::time::Duration;

use listkeeper_domain::{AppData, ListsState, StateListener};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::gateway::PersistenceGateway;

enum SaveMessage {
    Snapshot(AppData),
    Cancel,
}

/// Feeds snapshots of every changed state to the save worker.
///
/// Register it as the container's listener; it only queues, the worker
/// decides when to write.
#[derive(Clone)]
pub struct SaveTrigger {
    tx: mpsc::UnboundedSender<SaveMessage>,
}

impl SaveTrigger {
    pub fn queue(&self, document: AppData) {
        if self.tx.send(SaveMessage::Snapshot(document)).is_err() {
            tracing::debug!("Save worker stopped, dropping snapshot");
        }
    }
}

impl StateListener for SaveTrigger {
    fn state_changed(&self, state: &ListsState) {
        tracing::debug!("Queueing snapshot for debounced save");
        self.queue(state.to_document());
    }
}

/// Background task that saves the latest queued document once no new one
/// has arrived for the quiet period.
pub struct DebouncedSaver {
    trigger: SaveTrigger,
    shutdown_tx: mpsc::UnboundedSender<()>,
    handle: JoinHandle<()>,
}

impl DebouncedSaver {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(gateway: Arc<PersistenceGateway>, quiet: Duration) -> (Self, SaveTrigger) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(run(gateway, quiet, rx, shutdown_rx));

        let trigger = SaveTrigger { tx };
        let saver = Self {
            trigger: trigger.clone(),
            shutdown_tx,
            handle,
        };
        (saver, trigger)
    }

    pub fn queue(&self, document: AppData) {
        self.trigger.queue(document);
    }

    /// Drop whatever snapshot is waiting for its quiet period. Snapshots
    /// queued before this call are never written.
    pub fn cancel_pending(&self) {
        if self.trigger.tx.send(SaveMessage::Cancel).is_err() {
            tracing::debug!("Save worker stopped, nothing to cancel");
        }
    }

    /// Stop the worker. A save still waiting for its quiet period is
    /// dropped, a save already writing is allowed to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.handle.await {
            tracing::error!("Save worker ended abnormally: {}", e);
        }
    }
}

async fn run(
    gateway: Arc<PersistenceGateway>,
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<SaveMessage>,
    mut shutdown_rx: mpsc::UnboundedReceiver<()>,
) {
    let mut pending: Option<AppData> = None;

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                if pending.is_some() {
                    tracing::debug!("Cancelling pending save");
                }
                break;
            }
            next = rx.recv() => match next {
                // Each new snapshot restarts the quiet period
                Some(SaveMessage::Snapshot(document)) => pending = Some(document),
                Some(SaveMessage::Cancel) => {
                    if pending.take().is_some() {
                        tracing::debug!("Cancelling pending save");
                    }
                }
                None => break,
            },
            _ = tokio::time::sleep(quiet), if pending.is_some() => {
                if let Some(document) = pending.take() {
                    if let Err(e) = gateway.save(&document).await {
                        tracing::error!("Background save failed: {}", e);
                    }
                }
            }
        }
    }

    tracing::debug!("Save worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::STORAGE_KEY;
    use crate::store::MemoryStore;
    use crate::traits::KeyValueStore;
    use listkeeper_domain::{List, ListType, ListsStore, VisualStyle};

    const QUIET: Duration = Duration::from_millis(500);

    fn setup() -> (Arc<MemoryStore>, DebouncedSaver, SaveTrigger) {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(PersistenceGateway::new(store.clone()));
        let (saver, trigger) = DebouncedSaver::spawn(gateway, QUIET);
        (store, saver, trigger)
    }

    fn list(name: &str) -> List {
        List::new(name, ListType::Bullet, "ocean", VisualStyle::Card).with_id(name)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesces_into_one_save() {
        let (store, _saver, trigger) = setup();
        let mut container = ListsStore::new();
        container.set_listener(Box::new(trigger));

        for name in ["a", "b", "c"] {
            container.create_list(list(name));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(store.write_count(), 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.write_count(), 1);

        let raw = store.get(STORAGE_KEY).await.unwrap().unwrap();
        let saved: AppData = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved, container.to_document());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_save_separately() {
        let (store, _saver, trigger) = setup();

        trigger.queue(AppData::default());
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.queue(AppData::with_theme("forest"));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_save_without_changes() {
        let (store, _saver, trigger) = setup();
        let mut doc = AppData::default();
        doc.lists.push(list("a"));
        let mut container = ListsStore::from_document(&doc);
        container.set_listener(Box::new(trigger));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_save() {
        let (store, saver, trigger) = setup();

        trigger.queue(AppData::default());
        tokio::time::sleep(Duration::from_millis(100)).await;
        saver.shutdown().await;

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.write_count(), 0);
        // Queueing after shutdown is harmless
        trigger.queue(AppData::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_queued_snapshots() {
        let (store, saver, trigger) = setup();

        trigger.queue(AppData::default());
        trigger.queue(AppData::with_theme("forest"));
        saver.cancel_pending();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.write_count(), 0);

        // Later snapshots are saved as usual
        saver.queue(AppData::with_theme("sunset"));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.write_count(), 1);
        let raw = store.get(STORAGE_KEY).await.unwrap().unwrap();
        let saved: AppData = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved.preferences.theme_id, "sunset");
    }
}
