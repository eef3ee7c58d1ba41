use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tracing::debug;

use super::{DocumentStore, StoredDocument, SubscriptionHub, WritePrecondition};
use crate::config::db::StoreKind;
use crate::errors::domain::DomainError;

/// Process-local store. Writes are serialized by one mutex and published
/// before it is released, so subscribers see versions in order.
pub struct MemoryStore {
    documents: Mutex<HashMap<String, StoredDocument>>,
    hub: SubscriptionHub,
}

impl MemoryStore {
    pub fn new(feed_capacity: usize) -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            hub: SubscriptionHub::new(feed_capacity),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(super::DEFAULT_FEED_CAPACITY)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn load(&self, path: &str) -> Result<Option<StoredDocument>, DomainError> {
        Ok(self.documents.lock().get(path).cloned())
    }

    async fn save(
        &self,
        path: &str,
        body: Value,
        precondition: WritePrecondition,
    ) -> Result<StoredDocument, DomainError> {
        let mut documents = self.documents.lock();
        let current = documents.get(path).map(|d| d.version);
        precondition.check(path, current)?;

        let doc = StoredDocument {
            path: path.to_string(),
            version: current.unwrap_or(0) + 1,
            body,
            updated_at: OffsetDateTime::now_utc(),
        };
        documents.insert(path.to_string(), doc.clone());
        self.hub.publish(&doc);
        debug!(path, version = doc.version, "Stored document");

        Ok(doc)
    }

    fn subscribe(&self, path: &str) -> broadcast::Receiver<StoredDocument> {
        self.hub.subscribe(path)
    }
}
