//! Error codes for the hide-and-seek API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in problem-details responses.

use core::fmt;

/// Centralized error codes for the hide-and-seek API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Destination not adjacent to the player's station
    InvalidMove,
    /// Player is not on the roster
    UnknownPlayer,
    /// Station is not part of the graph
    UnknownStation,
    /// Unrecognised challenge filter
    InvalidFilter,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Invalid or missing HTTP header
    InvalidHeader,

    // Resource Not Found
    /// Challenge index out of range
    ChallengeNotFound,
    /// No game state document stored yet
    GameStateNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Stored version did not match the expected version
    OptimisticLock,
    /// Create-only write found an existing document
    AlreadyExists,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Store unavailable
    StoreUnavailable,
    /// Store timeout (gateway timeout)
    StoreTimeout,
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
    /// Stored document failed validation
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidMove => "INVALID_MOVE",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::UnknownStation => "UNKNOWN_STATION",
            Self::InvalidFilter => "INVALID_FILTER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidHeader => "INVALID_HEADER",

            Self::ChallengeNotFound => "CHALLENGE_NOT_FOUND",
            Self::GameStateNotFound => "GAME_STATE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StoreTimeout => "STORE_TIMEOUT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
