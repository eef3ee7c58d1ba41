#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod trace_ctx;
pub mod ws;

// Re-exports for public API
pub use config::db::{StoreConfig, StoreKind};
pub use error::AppError;
pub use errors::ErrorCode;
pub use infra::db::connect_db;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use services::{GameController, StateFeed};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
