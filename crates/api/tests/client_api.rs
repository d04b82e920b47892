//! HTTP-level integration tests for the `/api/clients` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_as, post_json_as, GYM_A, GYM_B};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_client_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_as(
        app,
        "/api/clients",
        GYM_A,
        serde_json::json!({ "first_name": "  Ana ", "last_name": "Ruiz" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["first_name"], "Ana");
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["gym_id"], GYM_A);
    assert!(json["data"]["registered_on"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_first_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_as(
        app,
        "/api/clients",
        GYM_A,
        serde_json::json!({ "first_name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "first_name is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clients_are_isolated_per_gym(pool: PgPool) {
    let id = common::create_client(&pool, GYM_A, "Ana", None).await;
    common::create_client(&pool, GYM_B, "Luis", None).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_as(app, "/api/clients", GYM_A).await).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["first_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Ana"]);

    let app = common::build_test_app(pool.clone());
    let response = get_as(app, &format!("/api/clients/{id}"), GYM_B).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get_as(app, &format!("/api/clients/{id}"), GYM_A).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expiring_on_filters_by_exact_date(pool: PgPool) {
    for (name, expires) in [("Ana", "2024-06-30"), ("Luis", "2024-07-01")] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_as(
            app,
            "/api/clients",
            GYM_A,
            serde_json::json!({ "first_name": name, "membership_expires_on": expires }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let json = body_json(get_as(app, "/api/clients?expiring_on=2024-06-30", GYM_A).await).await;
    let clients = json["data"].as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["first_name"], "Ana");
}
