#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mastergym_api::auth::jwt::{generate_access_token, JwtConfig};
use mastergym_api::config::{BackupConfig, ServerConfig};
use mastergym_api::router::build_app_router;
use mastergym_api::state::AppState;

pub const GYM_A: i64 = 1;
pub const GYM_B: i64 = 2;

pub const TEST_BACKUP_TOKEN: &str = "backup-test-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// Backups point at a script that does not exist; tests that run one use
/// [`test_config_with_backup`].
pub fn test_config() -> ServerConfig {
    test_config_with_backup(BackupConfig {
        token: Some(TEST_BACKUP_TOKEN.to_string()),
        script_path: PathBuf::from("/nonexistent/backup.sh"),
        interpreter: "bash".to_string(),
        timeout_secs: 10,
    })
}

pub fn test_config_with_backup(backup: BackupConfig) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: test_jwt_config(),
        backup,
    }
}

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-long-enough".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build the full application router, with production middleware, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config))
}

/// A valid access token for a staff user of `gym_id`.
pub fn token_for(gym_id: i64) -> String {
    generate_access_token(100 + gym_id, gym_id, &test_jwt_config()).expect("token")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should succeed")
}

fn authed(method: Method, uri: &str, gym_id: i64) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token_for(gym_id)))
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_as(app: Router, uri: &str, gym_id: i64) -> Response {
    let request = authed(Method::GET, uri, gym_id)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    gym_id: i64,
    body: serde_json::Value,
) -> Response {
    let request = authed(Method::POST, uri, gym_id)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_as(
    app: Router,
    uri: &str,
    gym_id: i64,
    body: serde_json::Value,
) -> Response {
    let request = authed(Method::PUT, uri, gym_id)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_as(app: Router, uri: &str, gym_id: i64) -> Response {
    let request = authed(Method::DELETE, uri, gym_id)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST /api/backup with an optional `X-BACKUP-TOKEN`.
pub async fn post_backup(app: Router, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri("/api/backup");
    if let Some(token) = token {
        builder = builder.header("x-backup-token", token);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

/// Create a client in `gym_id` and return its id.
pub async fn create_client(pool: &PgPool, gym_id: i64, first: &str, last: Option<&str>) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_as(
        app,
        "/api/clients",
        gym_id,
        serde_json::json!({ "first_name": first, "last_name": last }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("client id")
}

/// A complete measurement payload for `client_id`.
pub fn measurement_body(client_id: i64, measured_on: &str, weight_kg: f64) -> serde_json::Value {
    serde_json::json!({
        "client_id": client_id,
        "measured_on": measured_on,
        "weight_kg": weight_kg,
        "height_cm": 175.0,
        "chest_cm": 100.0,
        "waist_cm": 84.0,
        "hip_cm": 97.0,
        "left_arm_cm": 33.0,
        "right_arm_cm": 33.5,
        "left_leg_cm": 57.0,
        "right_leg_cm": 57.5,
        "body_fat_pct": 18.5,
        "notes": "  baseline  "
    })
}

/// Create a measurement and return its id.
pub async fn create_measurement(
    pool: &PgPool,
    gym_id: i64,
    client_id: i64,
    measured_on: &str,
    weight_kg: f64,
) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json_as(
        app,
        "/api/measurements",
        gym_id,
        measurement_body(client_id, measured_on, weight_kg),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("measurement id")
}
