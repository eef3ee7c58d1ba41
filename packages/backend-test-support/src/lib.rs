//! Backend test support utilities
//!
//! Logging initialization shared by unit and integration tests, and
//! assertions for problem-details error responses.

pub mod logging;
pub mod problem_details;
