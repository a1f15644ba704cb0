use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;
use chrono::Utc;
use common::types::car::{Car, CarPatch, NewCar};
use models::car::{self, Entity as CarEntity};
use crate::errors::ServiceError;

/// List every car, newest first.
pub async fn list_cars(db: &DatabaseConnection) -> Result<Vec<Car>, ServiceError> {
    let rows = CarEntity::find()
        .order_by_desc(car::Column::CreatedAt)
        .all(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(rows.into_iter().map(Car::from).collect())
}

/// Create a car owned by `owner_id`.
pub async fn create_car(db: &DatabaseConnection, owner_id: &str, input: &NewCar) -> Result<Car, ServiceError> {
    // validations are in models::car
    let created = car::create(
        db,
        owner_id,
        &input.make,
        &input.model,
        input.availability.is_available,
        input.availability.renter.as_deref(),
    )
    .await?;
    Ok(created.into())
}

/// Get a car by id.
pub async fn get_car(db: &DatabaseConnection, id: Uuid) -> Result<Option<Car>, ServiceError> {
    let found = CarEntity::find_by_id(id).one(db).await.map_err(ServiceError::db)?;
    Ok(found.map(Car::from))
}

/// Apply `patch` to the car matching both `id` and `owner_id`.
///
/// The owner check is part of the `UPDATE ... WHERE` predicate; the re-read
/// happens in the same transaction. `None` when nothing matched.
pub async fn update_owned_car(
    db: &DatabaseConnection,
    id: Uuid,
    owner_id: &str,
    patch: &CarPatch,
) -> Result<Option<Car>, ServiceError> {
    let mut update = CarEntity::update_many()
        .col_expr(car::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(car::Column::Id.eq(id))
        .filter(car::Column::UserId.eq(owner_id));
    if let Some(make) = &patch.make {
        update = update.col_expr(car::Column::Make, Expr::value(car::validate_make(make)?));
    }
    if let Some(model) = &patch.model {
        update = update.col_expr(car::Column::Model, Expr::value(car::validate_model(model)?));
    }
    if let Some(availability) = &patch.availability {
        let renter = car::normalize_renter(availability.renter.as_deref())?;
        update = update
            .col_expr(car::Column::IsAvailable, Expr::value(availability.is_available))
            .col_expr(car::Column::Renter, Expr::value(renter));
    }

    let txn = db.begin().await.map_err(ServiceError::db)?;
    let res = update.exec(&txn).await.map_err(ServiceError::db)?;
    if res.rows_affected == 0 {
        txn.rollback().await.map_err(ServiceError::db)?;
        return Ok(None);
    }
    let updated = CarEntity::find_by_id(id).one(&txn).await.map_err(ServiceError::db)?;
    txn.commit().await.map_err(ServiceError::db)?;
    Ok(updated.map(Car::from))
}

/// Delete the car matching both `id` and `owner_id`; returns true if deleted.
pub async fn delete_owned_car(db: &DatabaseConnection, id: Uuid, owner_id: &str) -> Result<bool, ServiceError> {
    let res = CarEntity::delete_many()
        .filter(car::Column::Id.eq(id))
        .filter(car::Column::UserId.eq(owner_id))
        .exec(db)
        .await
        .map_err(ServiceError::db)?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use common::types::car::Availability;

    #[tokio::test]
    async fn car_crud_store() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = create_car(&db, "u1", &NewCar::new("Toyota", "Corolla")).await?;
        let found = get_car(&db, a.id).await?.unwrap();
        assert_eq!(found.make, "Toyota");
        assert_eq!(found.user_id, "u1");

        let patch = CarPatch {
            model: Some("Camry".into()),
            availability: Some(Availability { is_available: false, renter: Some("Ann".into()) }),
            ..CarPatch::default()
        };
        let updated = update_owned_car(&db, a.id, "u1", &patch).await?.unwrap();
        assert_eq!(updated.model, "Camry");
        assert_eq!(updated.make, "Toyota");
        assert!(!updated.availability.is_available);
        assert_eq!(updated.availability.renter.as_deref(), Some("Ann"));
        assert_eq!(updated.created_at, a.created_at);
        assert!(updated.updated_at >= a.updated_at);

        let deleted = delete_owned_car(&db, a.id, "u1").await?;
        assert!(deleted);
        let after = get_car(&db, a.id).await?;
        assert!(after.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn foreign_owner_matches_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_car(&db, "u1", &NewCar::new("Toyota", "Corolla")).await?;

        let patch = CarPatch { model: Some("Camry".into()), ..CarPatch::default() };
        assert!(update_owned_car(&db, a.id, "u2", &patch).await?.is_none());
        assert!(!delete_owned_car(&db, a.id, "u2").await?);

        let untouched = get_car(&db, a.id).await?.unwrap();
        assert_eq!(untouched.model, "Corolla");
        assert_eq!(untouched.user_id, "u1");
        assert_eq!(untouched.updated_at, a.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn delete_only_removes_the_matching_row() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mine = create_car(&db, "u1", &NewCar::new("Honda", "Civic")).await?;
        let theirs = create_car(&db, "u2", &NewCar::new("Ford", "Focus")).await?;

        assert!(delete_owned_car(&db, mine.id, "u1").await?);
        let rest = list_cars(&db).await?;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, theirs.id);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let r1 = create_car(&db, "u1", &NewCar::new("Mazda", "3")).await?;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let r2 = create_car(&db, "u1", &NewCar::new("Kia", "Rio")).await?;

        let ids: Vec<Uuid> = list_cars(&db).await?.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![r2.id, r1.id]);
        Ok(())
    }
}
