//! Create `car` table.
//!
//! Availability is stored flat (`is_available`, `renter`); `user_id` is the
//! opaque owner identity handed over by the auth layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(uuid(Car::Id).primary_key())
                    .col(string_len(Car::Make, 128))
                    .col(string_len(Car::Model, 128))
                    .col(boolean(Car::IsAvailable).default(true))
                    .col(
                        ColumnDef::new(Car::Renter)
                            .string_len(255)
                            .null(),
                    )
                    .col(string_len(Car::UserId, 128))
                    .col(timestamp_with_time_zone(Car::CreatedAt))
                    .col(timestamp_with_time_zone(Car::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Car::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Car {
    Table,
    Id,
    Make,
    Model,
    IsAvailable,
    Renter,
    UserId,
    CreatedAt,
    UpdatedAt,
}
