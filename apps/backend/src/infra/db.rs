use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connect and bring the schema up to date.
///
/// In-memory SQLite gets a single pooled connection; every connection would
/// otherwise open its own empty database.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);
    if url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "Database connected and migrated");
    Ok(conn)
}
