//! Infrastructure layer - database connection, state assembly, DB error mapping.

pub mod db;
pub mod db_errors;
pub mod state;
