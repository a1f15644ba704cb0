use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::Service;

use server::routes::{self, auth::ServerState};
use service::auth::Claims;
use service::car::repository::memory::InMemoryCarRepository;

const SECRET: &str = "test-secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    let state = ServerState::new(Arc::new(InMemoryCarRepository::new()), SECRET);
    routes::build_router(state, cors())
}

fn token_for(owner: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims { sub: Some(owner.into()), uid: None, exp: (now + ttl_secs) as usize, iat: Some(now as usize) };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).expect("sign token")
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    Ok(req)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, request("GET", "/health", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn toyota_scenario() -> anyhow::Result<()> {
    let app = build_app();
    let u1 = token_for("u1", 3600);
    let u2 = token_for("u2", 3600);

    let (status, created) = send(&app, request("POST", "/cars", Some(&u1), Some(json!({"make": "Toyota", "model": "Corolla"})))?).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], "u1");
    assert_eq!(created["availability"]["isAvailable"], true);
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(&app, request("PUT", &format!("/cars/{id}"), Some(&u2), Some(json!({"model": "Camry"})))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Car not found");

    let (status, unchanged) = send(&app, request("GET", &format!("/cars/{id}"), None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged["model"], "Corolla");

    let (status, updated) = send(&app, request("PUT", &format!("/cars/{id}"), Some(&u1), Some(json!({"model": "Camry"})))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["model"], "Camry");
    assert_eq!(updated["make"], "Toyota");
    Ok(())
}

#[tokio::test]
async fn writes_require_a_valid_token() -> anyhow::Result<()> {
    let app = build_app();
    let car = json!({"make": "Honda", "model": "Civic"});

    let (status, body) = send(&app, request("POST", "/cars", None, Some(car.clone()))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let expired = token_for("u1", -3600);
    let (status, _) = send(&app, request("POST", "/cars", Some(&expired), Some(car.clone()))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, request("POST", "/cars", Some("not.a.jwt"), Some(car))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, list) = send(&app, request("GET", "/cars", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn token_cookie_is_accepted() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/cars")
        .header("content-type", "application/json")
        .header("cookie", format!("auth_token={}", token_for("cookie-user", 600)))
        .body(Body::from(serde_json::to_vec(&json!({"make": "Kia", "model": "Rio"}))?))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], "cookie-user");
    Ok(())
}

#[tokio::test]
async fn owner_in_body_is_ignored() -> anyhow::Result<()> {
    let app = build_app();
    let u1 = token_for("u1", 3600);
    let (_, created) = send(&app, request("POST", "/cars", Some(&u1), Some(json!({"make": "Ford", "model": "Focus", "user_id": "mallory"})))?).await?;
    assert_eq!(created["user_id"], "u1");
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, updated) = send(&app, request("PUT", &format!("/cars/{id}"), Some(&u1), Some(json!({"user_id": "mallory"})))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["user_id"], "u1");
    Ok(())
}

#[tokio::test]
async fn delete_is_owner_scoped() -> anyhow::Result<()> {
    let app = build_app();
    let alice = token_for("alice", 3600);
    let bob = token_for("bob", 3600);
    let (_, created) = send(&app, request("POST", "/cars", Some(&alice), Some(json!({"make": "Mazda", "model": "3"})))?).await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, request("DELETE", &format!("/cars/{id}"), Some(&bob), None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, request("GET", &format!("/cars/{id}"), None, None)?).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, request("DELETE", &format!("/cars/{id}"), Some(&alice), None)?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    let (status, _) = send(&app, request("GET", &format!("/cars/{id}"), None, None)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_ids_are_not_found() -> anyhow::Result<()> {
    let app = build_app();
    let u1 = token_for("u1", 3600);
    for id in ["abc", "12345", "507f1f77bcf86cd799439011"] {
        let (status, body) = send(&app, request("GET", &format!("/cars/{id}"), None, None)?).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
        assert_eq!(body["error"], "Not Found");
        let (status, _) = send(&app, request("DELETE", &format!("/cars/{id}"), Some(&u1), None)?).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn invalid_bodies_are_validation_errors() -> anyhow::Result<()> {
    let app = build_app();
    let u1 = token_for("u1", 3600);

    let (status, body) = send(&app, request("POST", "/cars", Some(&u1), Some(json!({"model": "Corolla"})))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let req = Request::builder()
        .method("POST")
        .uri("/cars")
        .header("authorization", format!("Bearer {u1}"))
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let (status, _) = send(&app, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn api_prefix_mirrors_root_routes() -> anyhow::Result<()> {
    let app = build_app();
    let u1 = token_for("u1", 3600);
    let (status, created) = send(&app, request("POST", "/api/cars", Some(&u1), Some(json!({"make": "Toyota", "model": "Yaris"})))?).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(&app, request("GET", "/cars", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], created["id"]);

    let (status, _) = send(&app, request("POST", "/api/cars", None, Some(json!({"make": "a", "model": "b"})))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_car_paths() -> anyhow::Result<()> {
    let app = build_app();
    let (status, doc) = send(&app, request("GET", "/api-docs/openapi.json", None, None)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/cars"].is_object());
    assert!(doc["paths"]["/cars/{id}"]["put"].is_object());
    Ok(())
}

#[tokio::test]
async fn lowercase_bearer_scheme_is_accepted() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/cars")
        .header("authorization", format!("bearer {}", token_for("u1", 600)))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"make": "Seat", "model": "Ibiza"}))?))?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], "u1");
    Ok(())
}

#[tokio::test]
async fn availability_patch_must_state_is_available() -> anyhow::Result<()> {
    let app = build_app();
    let u1 = token_for("u1", 3600);
    let rented = json!({"make": "Opel", "model": "Astra", "availability": {"isAvailable": false, "renter": "Ann"}});
    let (_, created) = send(&app, request("POST", "/cars", Some(&u1), Some(rented))?).await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(&app, request("PUT", &format!("/cars/{id}"), Some(&u1), Some(json!({"availability": {"renter": "Bea"}})))?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (_, unchanged) = send(&app, request("GET", &format!("/cars/{id}"), None, None)?).await?;
    assert_eq!(unchanged["availability"]["isAvailable"], false);
    assert_eq!(unchanged["availability"]["renter"], "Ann");
    Ok(())
}
