use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod auth;
pub mod cars;

use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Car routes: reads are public, writes go through the bearer-token layer.
fn car_routes(state: &ServerState) -> Router<ServerState> {
    let public = Router::new()
        .route("/cars", get(cars::list))
        .route("/cars/:id", get(cars::get));

    let protected = Router::new()
        .route("/cars", post(cars::create))
        .route("/cars/:id", put(cars::update).delete(cars::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    public.merge(protected)
}

/// Build the full application router: health, docs, and the car routes
/// at the root and again under `/api`.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let cars = car_routes(&state);

    Router::new()
        .route("/health", get(health))
        .merge(cars.clone())
        .nest("/api", cars)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
