use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct AvailabilityDoc {
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    pub renter: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CarDoc {
    #[schema(format = Uuid)]
    pub id: String,
    pub make: String,
    pub model: String,
    pub availability: AvailabilityDoc,
    pub user_id: String,
    #[serde(rename = "createdAt")]
    #[schema(format = DateTime)]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    #[schema(format = DateTime)]
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct NewCarDoc {
    pub make: String,
    pub model: String,
    pub availability: Option<AvailabilityDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct CarPatchDoc {
    pub make: Option<String>,
    pub model: Option<String>,
    pub availability: Option<AvailabilityDoc>,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc { pub error: String, pub message: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cars::list,
        crate::routes::cars::create,
        crate::routes::cars::get,
        crate::routes::cars::update,
        crate::routes::cars::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AvailabilityDoc,
            CarDoc,
            NewCarDoc,
            CarPatchDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cars")
    )
)]
pub struct ApiDoc;
