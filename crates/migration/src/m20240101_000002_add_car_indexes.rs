//! Indexes backing the owner-scoped predicate and the newest-first listing.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_car::Car;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_car_user_id")
                    .table(Car::Table)
                    .col(Car::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_car_created_at")
                    .table(Car::Table)
                    .col(Car::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_car_created_at").table(Car::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_car_user_id").table(Car::Table).to_owned())
            .await
    }
}
