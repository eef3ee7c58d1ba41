use serde::{Deserialize, Serialize};

use crate::domain::view::GameView;

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello { protocol: i32 },
    /// Filter is kept as text so an unknown value can be answered with
    /// `invalid_filter` instead of a parse failure.
    SetFilter { filter: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck { protocol: i32 },
    View { version: i32, view: GameView },
    Error { code: ErrorCode, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadProtocol,
    BadRequest,
    InvalidFilter,
}
