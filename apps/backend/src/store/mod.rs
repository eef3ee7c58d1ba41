//! Versioned document store.
//!
//! One JSON document per logical path. Every successful write bumps the
//! version (starting at 1) and is pushed to all subscribers of that path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::broadcast;

use crate::config::db::StoreKind;
use crate::errors::domain::{ConflictKind, DomainError};

pub mod hub;
pub mod memory;
pub mod sea;

pub use hub::SubscriptionHub;
pub use memory::MemoryStore;
pub use sea::SeaStore;

/// Default broadcast capacity per path.
pub const DEFAULT_FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub path: String,
    pub version: i32,
    pub body: Value,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Condition a write must satisfy against the currently stored version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePrecondition {
    /// Unconditional overwrite
    Any,
    /// Create only
    Absent,
    /// Stored version must equal this one
    Version(i32),
}

impl WritePrecondition {
    /// Maps a caller's expected version to a precondition. Version 0 means
    /// the caller saw no document.
    pub fn from_expected(expected: Option<i32>) -> Self {
        match expected {
            None => WritePrecondition::Any,
            Some(0) => WritePrecondition::Absent,
            Some(v) => WritePrecondition::Version(v),
        }
    }

    pub fn check(&self, path: &str, current: Option<i32>) -> Result<(), DomainError> {
        match (self, current) {
            (WritePrecondition::Any, _) => Ok(()),
            (WritePrecondition::Absent, None) => Ok(()),
            (WritePrecondition::Absent, Some(actual)) => Err(DomainError::conflict(
                ConflictKind::AlreadyExists,
                format!("Document '{path}' already exists at version {actual}"),
            )),
            (WritePrecondition::Version(expected), Some(actual)) if *expected == actual => Ok(()),
            (WritePrecondition::Version(expected), actual) => Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Document '{path}' was modified concurrently (expected version {expected}, actual version {}). Please refresh and retry.",
                    actual.unwrap_or(0)
                ),
            )),
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    async fn load(&self, path: &str) -> Result<Option<StoredDocument>, DomainError>;

    /// Full-document write guarded by `precondition`.
    async fn save(
        &self,
        path: &str,
        body: Value,
        precondition: WritePrecondition,
    ) -> Result<StoredDocument, DomainError>;

    /// Receiver for every version written to `path` after this call.
    fn subscribe(&self, path: &str) -> broadcast::Receiver<StoredDocument>;

    /// Cheap liveness probe used by the health endpoint.
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
