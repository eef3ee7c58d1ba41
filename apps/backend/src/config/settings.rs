//! Runtime settings read from the environment at start-up.

use std::env;

use crate::error::AppError;
use crate::store::DEFAULT_FEED_CAPACITY;

pub const DEFAULT_DOCUMENT_PATH: &str = "game/state";

/// Bind address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT must be a valid port number (got '{raw}')")))?,
            Err(_) => 3001,
        };
        Ok(Self { host, port })
    }
}

/// Game service knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    /// Logical path of the shared document in the store
    pub document_path: String,
    /// Fixed seed for challenge draws; `None` seeds from the OS
    pub challenge_seed: Option<u64>,
    pub feed_capacity: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            document_path: DEFAULT_DOCUMENT_PATH.to_string(),
            challenge_seed: None,
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

impl GameSettings {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let document_path = match env::var("HIDESEEK_DOCUMENT_PATH") {
            Ok(p) if !p.trim().is_empty() => p.trim().to_string(),
            _ => defaults.document_path,
        };

        let challenge_seed = optional_parsed::<u64>("HIDESEEK_CHALLENGE_SEED")?;

        let feed_capacity = optional_parsed::<usize>("HIDESEEK_FEED_CAPACITY")?
            .unwrap_or(defaults.feed_capacity);
        if feed_capacity == 0 {
            return Err(AppError::config(
                "HIDESEEK_FEED_CAPACITY must be positive".to_string(),
            ));
        }

        Ok(Self {
            document_path,
            challenge_seed,
            feed_capacity,
        })
    }
}

fn optional_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value '{raw}'"))),
        _ => Ok(None),
    }
}
