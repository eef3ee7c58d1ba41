//! SeaORM adapter for the game document table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::game_documents;

// Adapter functions return DbErr; the store maps to DomainError via map_db_err.

pub async fn find_by_path<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    path: &str,
) -> Result<Option<game_documents::Model>, sea_orm::DbErr> {
    game_documents::Entity::find_by_id(path.to_string())
        .one(conn)
        .await
}

/// Insert version 1 of a document. A concurrent insert surfaces as a unique
/// violation on the primary key.
pub async fn insert_first<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    path: &str,
    body: String,
) -> Result<game_documents::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = game_documents::ActiveModel {
        path: Set(path.to_string()),
        body: Set(body),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

/// Replace the body if the stored version still equals `current_version`,
/// bumping the version, then refetch.
///
/// Zero affected rows means another writer got there first; that is reported
/// as an `OPTIMISTIC_LOCK:` payload carrying both versions.
pub async fn optimistic_replace<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    path: &str,
    current_version: i32,
    body: String,
) -> Result<game_documents::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = game_documents::Entity::update_many()
        .col_expr(game_documents::Column::Body, Expr::val(body).into())
        .col_expr(game_documents::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_documents::Column::Version,
            Expr::col(game_documents::Column::Version).add(1),
        )
        .filter(game_documents::Column::Path.eq(path))
        .filter(game_documents::Column::Version.eq(current_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let actual = find_by_path(conn, path).await?.map(|m| m.version).unwrap_or(0);
        return Err(sea_orm::DbErr::Custom(format!(
            "OPTIMISTIC_LOCK:{{\"expected\":{current_version},\"actual\":{actual}}}"
        )));
    }

    find_by_path(conn, path)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Document '{path}' not found")))
}
