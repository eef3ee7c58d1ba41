use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use super::{DocumentStore, StoredDocument, SubscriptionHub, WritePrecondition};
use crate::adapters::game_documents_sea;
use crate::config::db::StoreKind;
use crate::entities::game_documents;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Upper bound on a single load or save round trip.
const STORE_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Unconditional writes that lose a race are replayed this many times.
const ANY_WRITE_ATTEMPTS: usize = 3;

/// SQL-backed store (SQLite or Postgres through SeaORM).
///
/// Each save runs in its own transaction with a version-filtered update, and
/// is published only after commit. Subscribers may therefore observe
/// versions from racing writers out of order; consumers drop stale ones.
pub struct SeaStore {
    db: DatabaseConnection,
    kind: StoreKind,
    hub: SubscriptionHub,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection, kind: StoreKind, feed_capacity: usize) -> Self {
        Self {
            db,
            kind,
            hub: SubscriptionHub::new(feed_capacity),
        }
    }

    async fn save_once(
        &self,
        path: &str,
        text: String,
        precondition: WritePrecondition,
    ) -> Result<game_documents::Model, DomainError> {
        let txn = self.db.begin().await?;
        let current = game_documents_sea::find_by_path(&txn, path).await?;
        precondition.check(path, current.as_ref().map(|m| m.version))?;

        let model = match current {
            None => game_documents_sea::insert_first(&txn, path, text).await?,
            Some(existing) => {
                game_documents_sea::optimistic_replace(&txn, path, existing.version, text).await?
            }
        };
        txn.commit().await?;
        Ok(model)
    }
}

async fn bounded<T, F>(op: &str, fut: F) -> Result<T, DomainError>
where
    F: std::future::Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(STORE_OP_TIMEOUT, fut)
        .await
        .map_err(|_| {
            DomainError::infra(
                InfraErrorKind::Timeout,
                format!("Store {op} exceeded {}s", STORE_OP_TIMEOUT.as_secs()),
            )
        })?
}

fn to_document(model: game_documents::Model) -> Result<StoredDocument, DomainError> {
    let body: Value = serde_json::from_str(&model.body).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Stored document '{}' is not valid JSON: {e}", model.path),
        )
    })?;
    Ok(StoredDocument {
        path: model.path,
        version: model.version,
        body,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl DocumentStore for SeaStore {
    fn kind(&self) -> StoreKind {
        self.kind
    }

    async fn load(&self, path: &str) -> Result<Option<StoredDocument>, DomainError> {
        let model = bounded("load", async {
            Ok::<_, DomainError>(game_documents_sea::find_by_path(&self.db, path).await?)
        })
        .await?;
        model.map(to_document).transpose()
    }

    async fn save(
        &self,
        path: &str,
        body: Value,
        precondition: WritePrecondition,
    ) -> Result<StoredDocument, DomainError> {
        let text = serde_json::to_string(&body).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("ENCODE".into()),
                format!("Failed to serialize document: {e}"),
            )
        })?;

        let attempts = match precondition {
            WritePrecondition::Any => ANY_WRITE_ATTEMPTS,
            _ => 1,
        };

        let mut attempt = 0;
        let model = loop {
            attempt += 1;
            match bounded("save", self.save_once(path, text.clone(), precondition)).await {
                Err(DomainError::Conflict(..)) if attempt < attempts => {
                    debug!(path, attempt, "Unconditional write lost a race; replaying");
                }
                other => break other?,
            }
        };

        let doc = to_document(model)?;
        self.hub.publish(&doc);
        debug!(path, version = doc.version, "Stored document");
        Ok(doc)
    }

    fn subscribe(&self, path: &str) -> broadcast::Receiver<StoredDocument> {
        self.hub.subscribe(path)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        bounded("ping", async { Ok::<_, DomainError>(self.db.ping().await?) }).await
    }
}
