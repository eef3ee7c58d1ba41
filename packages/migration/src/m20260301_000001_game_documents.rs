use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum GameDocuments {
    Table,
    Path,
    Body,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameDocuments::Path)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameDocuments::Body).text().not_null())
                    .col(
                        ColumnDef::new(GameDocuments::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(GameDocuments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameDocuments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(GameDocuments::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
