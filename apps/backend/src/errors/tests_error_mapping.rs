// Unit tests for error mapping - pure domain logic without HTTP server or database
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_invalid_move_to_422() {
    let de = DomainError::validation(ValidationKind::InvalidMove, "Central -> Wan Chai");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidMove);
    assert_eq!(app.status().as_u16(), 422);
    assert_eq!(app.detail(), "Central -> Wan Chai");
}

#[test]
fn maps_other_validation_to_generic_code() {
    let de = DomainError::validation(ValidationKind::Other("X".into()), "bad field");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".to_string()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Challenge, "index 7");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "CHALLENGE_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "STORE_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::StoreUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "STORE_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn humanized_title() {
    assert_eq!(AppError::humanize_code("INVALID_MOVE"), "Invalid Move");
}
