use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

use service::auth::AuthenticatedOwner;
use service::car::{Car, CarPatch, NewCar};

use crate::{errors::JsonApiError, routes::auth::ServerState};

#[utoipa::path(
    get, path = "/cars", tag = "cars",
    responses(
        (status = 200, description = "All cars, newest first", body = [crate::openapi::CarDoc]),
        (status = 500, description = "Server Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Car>>, JsonApiError> {
    let cars = state.cars.list_all().await?;
    Ok(Json(cars))
}

#[utoipa::path(
    post, path = "/cars", tag = "cars",
    request_body = crate::openapi::NewCarDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CarDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Server Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(owner): Extension<AuthenticatedOwner>,
    payload: Result<Json<NewCar>, JsonRejection>,
) -> Result<(StatusCode, Json<Car>), JsonApiError> {
    let Json(input) = payload?;
    let car = state.cars.create(&owner.owner_id, input).await?;
    info!(car_id = %car.id, owner_id = %car.user_id, "created car");
    Ok((StatusCode::CREATED, Json(car)))
}

#[utoipa::path(
    get, path = "/cars/{id}", tag = "cars",
    params(("id" = String, Path, description = "Car ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CarDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Car>, JsonApiError> {
    Ok(Json(state.cars.get_by_id(&id).await?))
}

#[utoipa::path(
    put, path = "/cars/{id}", tag = "cars",
    params(("id" = String, Path, description = "Car ID")),
    request_body = crate::openapi::CarPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CarDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Path(id): Path<String>,
    payload: Result<Json<CarPatch>, JsonRejection>,
) -> Result<Json<Car>, JsonApiError> {
    let Json(patch) = payload?;
    let car = state.cars.update_by_id_for_owner(&id, &owner.owner_id, patch).await?;
    Ok(Json(car))
}

#[utoipa::path(
    delete, path = "/cars/{id}", tag = "cars",
    params(("id" = String, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(owner): Extension<AuthenticatedOwner>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    state.cars.delete_by_id_for_owner(&id, &owner.owner_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
