//! Create providers table
//!
//! Deleting a user removes the providers it owns.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Providers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Providers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Providers::UserId).string().not_null())
                    .col(ColumnDef::new(Providers::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Providers::ServiceType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Providers::Location)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Providers::Certification).string())
                    .col(ColumnDef::new(Providers::Bio).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Providers::PriceNote)
                            .string_len(120)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Providers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Providers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_providers_user")
                            .from(Providers::Table, Providers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_providers_service_type")
                    .table(Providers::Table)
                    .col(Providers::ServiceType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_providers_location")
                    .table(Providers::Table)
                    .col(Providers::Location)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_providers_created_at")
                    .table(Providers::Table)
                    .col(Providers::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Providers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Providers {
    Table,
    Id,
    UserId,
    Name,
    ServiceType,
    Location,
    Certification,
    Bio,
    PriceNote,
    CreatedAt,
    UpdatedAt,
}
