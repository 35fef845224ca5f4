//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["media_ready"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_media_root_reports_degraded(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, &media.path().join("not-created"));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["media_ready"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "No route for /this-route-does-not-exist");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    // UUID, 36 chars with hyphens.
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
