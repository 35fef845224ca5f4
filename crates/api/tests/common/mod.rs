#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;

use taleweave_api::auth::jwt::{Claims, JwtConfig};
use taleweave_api::config::ServerConfig;
use taleweave_api::router::build_app_router;
use taleweave_api::state::AppState;
use taleweave_core::types::DbId;

const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
    }
}

/// Build a test `ServerConfig` rooted at `media_root`.
pub fn test_config(media_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: media_root.to_path_buf(),
        jwt: jwt_config(),
    }
}

/// Build the full application router, middleware included.
pub fn build_test_app(pool: PgPool, media_root: &Path) -> Router {
    build_app_router(AppState::new(pool, test_config(media_root)))
}

/// A valid bearer token for `user_id`, as the external issuer would mint it.
pub fn token_for(user_id: DbId) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + 15 * 60,
        iat: now,
        jti: uuid::Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw_auth(app: Router, uri: &str, raw: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding (the catalog is read-only through the API)
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, username: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO users (username) VALUES ($1) RETURNING id")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_story(pool: &PgPool, title: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO stories (title, summary) VALUES ($1, 'summary') RETURNING id")
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_branch(pool: &PgPool, story_id: DbId, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO branches (story_id, name) VALUES ($1, $2) RETURNING id")
        .bind(story_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_substory(
    pool: &PgPool,
    story_id: DbId,
    branch_id: Option<DbId>,
    title: &str,
    sort_order: i32,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO substories (story_id, branch_id, title, sort_order)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(story_id)
    .bind(branch_id)
    .bind(title)
    .bind(sort_order)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_character(pool: &PgPool, story_id: DbId, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO characters (story_id, name) VALUES ($1, $2) RETURNING id")
        .bind(story_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_script(
    pool: &PgPool,
    substory_id: DbId,
    character_id: DbId,
    line: &str,
    sort_order: i32,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO scripts (substory_id, character_id, line, sort_order)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(substory_id)
    .bind(character_id)
    .bind(line)
    .bind(sort_order)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Create a MyStory through the API and return its id.
pub async fn create_my_story(
    pool: &PgPool,
    media_root: &Path,
    token: &str,
    story_id: DbId,
    name: &str,
) -> DbId {
    let app = build_test_app(pool.clone(), media_root);
    let response = post_json_auth(
        app,
        "/api/v1/mystories",
        serde_json::json!({ "story_id": story_id, "story_name": name }),
        token,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Stage an image in the user's conversion directory.
pub fn stage_image(media_root: &Path, user_id: DbId, name: &str) {
    let dir = media_root
        .join("images")
        .join("user")
        .join(user_id.to_string())
        .join("conversion");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), b"image-bytes").unwrap();
}
