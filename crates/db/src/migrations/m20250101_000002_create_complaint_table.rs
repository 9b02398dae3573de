//! Create complaints table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Complaints::Description).text().not_null())
                    .col(ColumnDef::new(Complaints::Location).string_len(255).not_null())
                    .col(ColumnDef::new(Complaints::Category).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Complaints::Priority)
                            .string_len(32)
                            .not_null()
                            .default("medium"),
                    )
                    .col(
                        ColumnDef::new(Complaints::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Complaints::ReporterName).string_len(255).not_null())
                    .col(ColumnDef::new(Complaints::ReporterEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Complaints::ReporterPhone).string_len(20))
                    .col(ColumnDef::new(Complaints::AdminNotes).text())
                    .col(ColumnDef::new(Complaints::ResolvedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Complaints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Complaints::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (stats and status filter)
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_status")
                    .table(Complaints::Table)
                    .col(Complaints::Status)
                    .to_owned(),
            )
            .await?;

        // Index: category
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_category")
                    .table(Complaints::Table)
                    .col(Complaints::Category)
                    .to_owned(),
            )
            .await?;

        // Index: priority
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_priority")
                    .table(Complaints::Table)
                    .col(Complaints::Priority)
                    .to_owned(),
            )
            .await?;

        // Index: (status, created_at) for filtered newest-first listings
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_status_created_at")
                    .table(Complaints::Table)
                    .col(Complaints::Status)
                    .col(Complaints::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: (category, status)
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_category_status")
                    .table(Complaints::Table)
                    .col(Complaints::Category)
                    .col(Complaints::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Complaints {
    Table,
    Id,
    Title,
    Description,
    Location,
    Category,
    Priority,
    Status,
    ReporterName,
    ReporterEmail,
    ReporterPhone,
    AdminNotes,
    ResolvedAt,
    CreatedAt,
    UpdatedAt,
}
