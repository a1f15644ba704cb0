use async_trait::async_trait;
use uuid::Uuid;

use super::{Car, CarPatch, NewCar};
use crate::errors::ServiceError;

/// Persistence seam for cars.
///
/// `update_owned` and `delete_owned` match on id and owner in one predicate;
/// they return `None`/`false` both for a missing id and for a foreign owner.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list_newest_first(&self) -> Result<Vec<Car>, ServiceError>;
    async fn insert(&self, owner_id: &str, input: NewCar) -> Result<Car, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, ServiceError>;
    async fn update_owned(&self, id: Uuid, owner_id: &str, patch: CarPatch) -> Result<Option<Car>, ServiceError>;
    async fn delete_owned(&self, id: Uuid, owner_id: &str) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;
    use models::car as rules;

    use crate::car::Availability;

    #[derive(Default)]
    pub struct InMemoryCarRepository {
        cars: Mutex<Vec<Car>>, // insertion order
    }

    impl InMemoryCarRepository {
        pub fn new() -> Self { Self::default() }

        fn lock(&self) -> Result<MutexGuard<'_, Vec<Car>>, ServiceError> {
            self.cars.lock().map_err(|_| ServiceError::Db("car store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl CarRepository for InMemoryCarRepository {
        async fn list_newest_first(&self) -> Result<Vec<Car>, ServiceError> {
            let cars = self.lock()?;
            // Reverse first so equal timestamps still come out newest-inserted first.
            let mut out: Vec<Car> = cars.iter().rev().cloned().collect();
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(out)
        }

        async fn insert(&self, owner_id: &str, input: NewCar) -> Result<Car, ServiceError> {
            rules::validate_owner(owner_id)?;
            let now = Utc::now().fixed_offset();
            let car = Car {
                id: Uuid::new_v4(),
                make: rules::validate_make(&input.make)?,
                model: rules::validate_model(&input.model)?,
                availability: Availability {
                    is_available: input.availability.is_available,
                    renter: rules::normalize_renter(input.availability.renter.as_deref())?,
                },
                user_id: owner_id.to_string(),
                created_at: now,
                updated_at: now,
            };
            self.lock()?.push(car.clone());
            Ok(car)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, ServiceError> {
            Ok(self.lock()?.iter().find(|c| c.id == id).cloned())
        }

        async fn update_owned(&self, id: Uuid, owner_id: &str, patch: CarPatch) -> Result<Option<Car>, ServiceError> {
            let make = patch.make.as_deref().map(rules::validate_make).transpose()?;
            let model = patch.model.as_deref().map(rules::validate_model).transpose()?;
            let availability = match patch.availability {
                Some(a) => Some(Availability {
                    is_available: a.is_available,
                    renter: rules::normalize_renter(a.renter.as_deref())?,
                }),
                None => None,
            };

            let mut cars = self.lock()?;
            let Some(car) = cars.iter_mut().find(|c| c.id == id && c.user_id == owner_id) else {
                return Ok(None);
            };
            if let Some(make) = make { car.make = make; }
            if let Some(model) = model { car.model = model; }
            if let Some(availability) = availability { car.availability = availability; }
            car.updated_at = Utc::now().fixed_offset();
            Ok(Some(car.clone()))
        }

        async fn delete_owned(&self, id: Uuid, owner_id: &str) -> Result<bool, ServiceError> {
            let mut cars = self.lock()?;
            let before = cars.len();
            cars.retain(|c| !(c.id == id && c.user_id == owner_id));
            Ok(cars.len() < before)
        }
    }
}
