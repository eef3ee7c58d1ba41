//! Local synchronized view of the shared document.
//!
//! The feed subscribes to the store, runs the validated decode on every
//! pushed document and replaces its snapshot wholesale. Malformed or stale
//! pushes are dropped and the last good snapshot stays current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::decode::decode_state;
use crate::domain::setup::GameSetup;
use crate::domain::state::GameState;
use crate::error::AppError;
use crate::store::{DocumentStore, StoredDocument};

/// A decoded document and the version it was read at. Version 0 is the
/// empty state before any assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedState {
    pub version: i32,
    pub state: Arc<GameState>,
}

impl SyncedState {
    pub fn new(version: i32, state: GameState) -> Self {
        Self {
            version,
            state: Arc::new(state),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, GameState::default())
    }
}

pub struct StateFeed {
    rx: watch::Receiver<SyncedState>,
    task: JoinHandle<()>,
}

impl StateFeed {
    /// Subscribe, seed from a point read, then follow the store.
    pub async fn start(
        store: Arc<dyn DocumentStore>,
        setup: Arc<GameSetup>,
        path: String,
    ) -> Result<Self, AppError> {
        // Subscribe first so nothing written between the read and the
        // subscription is missed.
        let sub = store.subscribe(&path);

        let (tx, rx) = watch::channel(SyncedState::empty());
        if let Some(doc) = store.load(&path).await? {
            apply(&tx, &doc, &setup);
        }
        info!(path = %path, version = rx.borrow().version, "State feed started");

        let task = tokio::spawn(follow(sub, store, setup, path, tx));
        Ok(Self { rx, task })
    }

    pub fn current(&self) -> SyncedState {
        self.rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<SyncedState> {
        self.rx.clone()
    }

    /// Wait until the snapshot reaches at least `min_version`.
    pub async fn wait_for_version(&self, min_version: i32, timeout: Duration) -> Option<SyncedState> {
        let mut rx = self.rx.clone();
        let waited = tokio::time::timeout(timeout, rx.wait_for(|s| s.version >= min_version)).await;
        match waited {
            Ok(Ok(snapshot)) => Some(snapshot.clone()),
            _ => None,
        }
    }
}

impl Drop for StateFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Replace the snapshot if `doc` is newer and decodes.
fn apply(tx: &watch::Sender<SyncedState>, doc: &StoredDocument, setup: &GameSetup) {
    let held = tx.borrow().version;
    if doc.version <= held {
        debug!(path = %doc.path, version = doc.version, held, "Ignoring stale document");
        return;
    }

    match decode_state(&doc.body, setup) {
        Ok(state) => {
            tx.send_replace(SyncedState::new(doc.version, state));
        }
        Err(e) => {
            warn!(
                path = %doc.path,
                version = doc.version,
                error = %e,
                "Ignoring malformed game document; keeping last good state"
            );
        }
    }
}

async fn follow(
    mut sub: broadcast::Receiver<StoredDocument>,
    store: Arc<dyn DocumentStore>,
    setup: Arc<GameSetup>,
    path: String,
    tx: watch::Sender<SyncedState>,
) {
    loop {
        match sub.recv().await {
            Ok(doc) => apply(&tx, &doc, &setup),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(path = %path, skipped, "State feed lagged; reloading");
                match store.load(&path).await {
                    Ok(Some(doc)) => apply(&tx, &doc, &setup),
                    Ok(None) => {}
                    Err(e) => warn!(path = %path, error = %e, "Reload after lag failed"),
                }
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!(path = %path, "Store feed closed");
                break;
            }
        }
    }
}
