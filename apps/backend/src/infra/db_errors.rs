//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the store converts it here, and higher
//! layers map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::GameState, "Game document not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );
                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Document was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Document was modified by another writer; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::StoreUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::AlreadyExists,
            "Document was created by another writer",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("pool timed out") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
