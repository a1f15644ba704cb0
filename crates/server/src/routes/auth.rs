use std::sync::Arc;

use axum::{extract::{Request, State}, http::header, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;

use service::auth::{errors::AuthError, AuthenticatedOwner, TokenVerifier};
use service::car::{repository::CarRepository, CarService};

use crate::errors::JsonApiError;

/// Cookie consulted when no `Authorization` header is sent.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub cars: Arc<CarService<dyn CarRepository>>,
    pub tokens: Arc<TokenVerifier>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CarRepository>, jwt_secret: &str) -> Self {
        Self {
            cars: Arc::new(CarService::new(repo)),
            tokens: Arc::new(TokenVerifier::new(jwt_secret)),
        }
    }
}

/// Route middleware for writes: verifies `Authorization: Bearer <token>`
/// (or the `auth_token` cookie) and attaches the caller's
/// [`AuthenticatedOwner`] to the request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();

    let authz = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok());
    let verified = match (authz, jar.get(AUTH_COOKIE)) {
        (Some(h), _) => state.tokens.verify_header(h),
        (None, Some(c)) if !c.value().is_empty() => state.tokens.verify(c.value()),
        _ => Err(AuthError::Missing),
    };

    match verified {
        Ok(owner) => {
            tracing::debug!(path = %path, owner_id = %owner.owner_id, "bearer token accepted");
            req.extensions_mut().insert::<AuthenticatedOwner>(owner);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, code = e.code(), err = %e, "token validation failed");
            Err(e.into())
        }
    }
}
