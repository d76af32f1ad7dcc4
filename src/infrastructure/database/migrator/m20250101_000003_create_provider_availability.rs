//! Create provider_availability table
//!
//! One row per day a provider accepts bookings; (provider_id, date) is unique.

use sea_orm_migration::prelude::*;

use super::m20250101_000002_create_providers::Providers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderAvailability::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderAvailability::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProviderAvailability::ProviderId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProviderAvailability::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_provider")
                            .from(ProviderAvailability::Table, ProviderAvailability::ProviderId)
                            .to(Providers::Table, Providers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_availability_provider_date")
                    .table(ProviderAvailability::Table)
                    .col(ProviderAvailability::ProviderId)
                    .col(ProviderAvailability::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_date")
                    .table(ProviderAvailability::Table)
                    .col(ProviderAvailability::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderAvailability::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProviderAvailability {
    Table,
    Id,
    ProviderId,
    Date,
}
