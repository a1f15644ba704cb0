use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, warn, instrument};

use super::{Car, CarPatch, NewCar};
use super::repository::CarRepository;
use crate::errors::ServiceError;

/// Identifier-format check applied before any lookup.
///
/// Anything that is not a UUID can never name a stored car.
pub fn parse_car_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn car_not_found() -> ServiceError { ServiceError::not_found("car") }

/// Application service encapsulating the car ownership rules.
///
/// Reads are public; writes are scoped to the authenticated owner and fail
/// with the same `NotFound` whether the car is missing or belongs to someone
/// else.
pub struct CarService<R: CarRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CarRepository + ?Sized> CarService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All cars, newest first.
    pub async fn list_all(&self) -> Result<Vec<Car>, ServiceError> {
        let cars = self.repo.list_newest_first().await?;
        info!(count = cars.len(), "list cars");
        Ok(cars)
    }

    /// Create a car owned by `owner_id`.
    ///
    /// # Examples
    /// ```
    /// use service::car::{CarService, NewCar, repository::memory::InMemoryCarRepository};
    /// use std::sync::Arc;
    /// let svc = CarService::new(Arc::new(InMemoryCarRepository::new()));
    /// let car = tokio_test::block_on(svc.create("u1", NewCar::new("Toyota", "Corolla"))).unwrap();
    /// assert_eq!(car.user_id, "u1");
    /// let found = tokio_test::block_on(svc.get_by_id(&car.id.to_string())).unwrap();
    /// assert_eq!(found.make, "Toyota");
    /// ```
    #[instrument(skip_all, fields(owner_id = %owner_id))]
    pub async fn create(&self, owner_id: &str, input: NewCar) -> Result<Car, ServiceError> {
        if owner_id.trim().is_empty() {
            return Err(ServiceError::Validation("owner required".into()));
        }
        let car = self.repo.insert(owner_id, input).await?;
        info!(car_id = %car.id, make = %car.make, model = %car.model, "car_created");
        Ok(car)
    }

    /// Public lookup; a malformed id is reported as `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<Car, ServiceError> {
        let Some(id) = parse_car_id(id) else { return Err(car_not_found()); };
        self.repo.find_by_id(id).await?.ok_or_else(car_not_found)
    }

    /// Apply `patch` if, and only if, `owner_id` owns car `id`.
    ///
    /// # Examples
    /// ```
    /// use service::car::{CarPatch, CarService, NewCar, repository::memory::InMemoryCarRepository};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = CarService::new(Arc::new(InMemoryCarRepository::new()));
    /// let car = tokio_test::block_on(svc.create("u1", NewCar::new("Toyota", "Corolla"))).unwrap();
    /// let id = car.id.to_string();
    /// let patch = CarPatch { model: Some("Camry".into()), ..CarPatch::default() };
    /// let denied = tokio_test::block_on(svc.update_by_id_for_owner(&id, "u2", patch.clone()));
    /// assert!(matches!(denied, Err(ServiceError::NotFound(_))));
    /// let updated = tokio_test::block_on(svc.update_by_id_for_owner(&id, "u1", patch)).unwrap();
    /// assert_eq!(updated.model, "Camry");
    /// ```
    #[instrument(skip_all, fields(car_id = %id, owner_id = %owner_id))]
    pub async fn update_by_id_for_owner(&self, id: &str, owner_id: &str, patch: CarPatch) -> Result<Car, ServiceError> {
        let Some(car_id) = parse_car_id(id) else { return Err(car_not_found()); };
        match self.repo.update_owned(car_id, owner_id, patch).await? {
            Some(car) => {
                info!("car_updated");
                Ok(car)
            }
            None => {
                warn!("car update matched no owned record");
                Err(car_not_found())
            }
        }
    }

    /// Remove car `id` if `owner_id` owns it.
    #[instrument(skip_all, fields(car_id = %id, owner_id = %owner_id))]
    pub async fn delete_by_id_for_owner(&self, id: &str, owner_id: &str) -> Result<(), ServiceError> {
        let Some(car_id) = parse_car_id(id) else { return Err(car_not_found()); };
        if self.repo.delete_owned(car_id, owner_id).await? {
            info!("car_deleted");
            Ok(())
        } else {
            warn!("car delete matched no owned record");
            Err(car_not_found())
        }
    }
}
