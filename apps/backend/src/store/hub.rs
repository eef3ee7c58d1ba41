use dashmap::DashMap;
use tokio::sync::broadcast;

use super::StoredDocument;

/// Per-path broadcast channels, created on first subscribe.
pub struct SubscriptionHub {
    channels: DashMap<String, broadcast::Sender<StoredDocument>>,
    capacity: usize,
}

impl SubscriptionHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn subscribe(&self, path: &str) -> broadcast::Receiver<StoredDocument> {
        self.channels
            .entry(path.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Push `doc` to current subscribers of its path. No-op without any.
    pub fn publish(&self, doc: &StoredDocument) {
        if let Some(tx) = self.channels.get(&doc.path) {
            let _ = tx.send(doc.clone());
        }
    }
}
