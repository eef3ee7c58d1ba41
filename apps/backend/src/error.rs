use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::errors::{DomainError, ErrorCode};
use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Store unavailable: {detail}")]
    StoreUnavailable { detail: String },
    #[error("Timeout: {detail}")]
    Timeout { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::StoreUnavailable { .. } => ErrorCode::StoreUnavailable,
            AppError::Timeout { .. } => ErrorCode::StoreTimeout,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Internal { detail, .. }
            | AppError::Config { detail }
            | AppError::StoreUnavailable { detail }
            | AppError::Timeout { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn invalid(code: ErrorCode, detail: String) -> Self {
        Self::Validation {
            code,
            detail,
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn internal(code: ErrorCode, detail: String) -> Self {
        Self::Internal { code, detail }
    }

    pub fn bad_request(code: ErrorCode, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(code: ErrorCode, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn conflict(code: ErrorCode, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub(crate) fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(kind, detail) => {
                let code = match kind {
                    ValidationKind::InvalidMove => ErrorCode::InvalidMove,
                    ValidationKind::UnknownPlayer => ErrorCode::UnknownPlayer,
                    ValidationKind::UnknownStation => ErrorCode::UnknownStation,
                    ValidationKind::InvalidFilter => ErrorCode::InvalidFilter,
                    _ => ErrorCode::ValidationError,
                };
                AppError::invalid(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::AlreadyExists => ErrorCode::AlreadyExists,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Challenge => ErrorCode::ChallengeNotFound,
                    NotFoundKind::GameState => ErrorCode::GameStateNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::Timeout { detail },
                InfraErrorKind::StoreUnavailable => AppError::StoreUnavailable { detail },
                InfraErrorKind::DataCorruption => {
                    AppError::internal(ErrorCode::DataCorruption, detail)
                }
                _ => AppError::internal(ErrorCode::InternalError, detail),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::from(e).into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://hideseek.app/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail: self.detail(),
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id));

        if status == StatusCode::SERVICE_UNAVAILABLE {
            builder.insert_header(("Retry-After", "1"));
        }

        builder.json(problem_details)
    }
}
