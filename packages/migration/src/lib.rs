pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

mod m20260301_000001_game_documents; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260301_000001_game_documents::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl std::str::FromStr for MigrationCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "reset" => Ok(Self::Reset),
            "refresh" => Ok(Self::Refresh),
            "status" => Ok(Self::Status),
            other => Err(format!(
                "Unknown command: {other}. Use: up | down | fresh | reset | refresh | status"
            )),
        }
    }
}

/// Open a connection for migration work.
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(url).await
}

/// Run one migration command, logging applied counts before and after.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let backend = format!("{:?}", db.get_database_backend());
    let name = database_name(db).await.unwrap_or_else(|_| "<unknown>".to_string());
    let defined = Migrator::migrations().len();

    tracing::info!(cmd = ?command, backend = %backend, database = %name, "running migration command");
    tracing::info!(defined, applied = count_applied_migrations(db).await.unwrap_or(0), "before");

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                tracing::info!(defined, applied = count_applied_migrations(db).await.unwrap_or(0), "after");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(cmd = ?command, error = %e, "migration command failed");
            Err(e)
        }
    }
}

async fn database_name(db: &DatabaseConnection) -> Result<String, DbErr> {
    let backend = db.get_database_backend();
    let sql = match backend {
        sea_orm_migration::sea_orm::DatabaseBackend::Postgres => "select current_database() as name",
        sea_orm_migration::sea_orm::DatabaseBackend::Sqlite => {
            "SELECT file AS name FROM pragma_database_list WHERE name = 'main'"
        }
        _ => return Ok("<unsupported>".to_string()),
    };

    let row = db
        .query_one(Statement::from_string(backend, sql.to_string()))
        .await?;
    let name = match row {
        Some(row) => row.try_get::<String>("", "name").unwrap_or_default(),
        None => String::new(),
    };
    Ok(if name.is_empty() { ":memory:".to_string() } else { name })
}

/// Number of applied migrations; 0 before the migration table exists.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
