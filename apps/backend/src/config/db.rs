use std::env;

use crate::error::AppError;

/// Backend holding the shared game document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Process-local, lost on restart
    Memory,
    Sqlite,
    Postgres,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Sqlite => "sqlite",
            StoreKind::Postgres => "postgres",
        }
    }
}

impl std::str::FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreKind::Memory),
            "sqlite" => Ok(StoreKind::Sqlite),
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            other => Err(AppError::config(format!(
                "HIDESEEK_STORE must be one of memory, sqlite, postgres (got '{other}')"
            ))),
        }
    }
}

const DEFAULT_SQLITE_URL: &str = "sqlite://hideseek.db?mode=rwc";

/// Store selection resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// SeaORM connection URL; `None` for the memory store
    pub url: Option<String>,
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            kind: StoreKind::Memory,
            url: None,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let kind = match env::var("HIDESEEK_STORE") {
            Ok(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => StoreKind::Memory,
        };

        let url = match kind {
            StoreKind::Memory => None,
            StoreKind::Sqlite => Some(
                env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_SQLITE_URL.to_string()),
            ),
            StoreKind::Postgres => Some(match env::var("DATABASE_URL") {
                Ok(url) => url,
                Err(_) => postgres_url()?,
            }),
        };

        Ok(Self { kind, url })
    }
}

/// Builds a postgres URL from the POSTGRES_* variables
fn postgres_url() -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
