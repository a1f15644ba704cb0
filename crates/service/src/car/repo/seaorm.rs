use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::car::{Car, CarPatch, NewCar};
use crate::car::repository::CarRepository;
use crate::db::car_store;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn list_newest_first(&self) -> Result<Vec<Car>, ServiceError> {
        car_store::list_cars(&self.db).await
    }

    async fn insert(&self, owner_id: &str, input: NewCar) -> Result<Car, ServiceError> {
        car_store::create_car(&self.db, owner_id, &input).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, ServiceError> {
        car_store::get_car(&self.db, id).await
    }

    async fn update_owned(&self, id: Uuid, owner_id: &str, patch: CarPatch) -> Result<Option<Car>, ServiceError> {
        car_store::update_owned_car(&self.db, id, owner_id, &patch).await
    }

    async fn delete_owned(&self, id: Uuid, owner_id: &str) -> Result<bool, ServiceError> {
        car_store::delete_owned_car(&self.db, id, owner_id).await
    }
}
