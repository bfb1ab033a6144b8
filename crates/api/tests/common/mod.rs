#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use scribe_api::auth::jwt::{generate_access_token, JwtConfig};
use scribe_api::auth::password::hash_password;
use scribe_api::config::ServerConfig;
use scribe_api::router::build_app_router;
use scribe_api::state::AppState;
use scribe_core::roles::STATUS_ACTIVE;
use scribe_core::types::DbId;
use scribe_db::models::chapter::{Chapter, CreateChapter};
use scribe_db::models::collaborator::CreateCollaborator;
use scribe_db::models::project::{CreateProject, Project};
use scribe_db::models::user::{CreateUser, User};
use scribe_db::repositories::{ChapterRepo, CollaboratorRepo, ProjectRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        password_min_length: 8,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the production router (same middleware stack) over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            display_name: Some(format!("{username} display")),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Mint an access token for `user` signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.username, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn create_project(pool: &PgPool, owner: &User, title: &str) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            title: title.to_string(),
            description: None,
            owner_id: owner.id,
        },
    )
    .await
    .expect("project creation should succeed")
}

pub async fn add_member(
    pool: &PgPool,
    project_id: DbId,
    user: &User,
    role: &str,
    secondary_roles: &[&str],
) {
    add_member_with_status(pool, project_id, user, role, secondary_roles, STATUS_ACTIVE).await;
}

pub async fn deactivate_user(pool: &PgPool, user_id: DbId) {
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("deactivation should succeed");
}

pub async fn add_member_with_status(
    pool: &PgPool,
    project_id: DbId,
    user: &User,
    role: &str,
    secondary_roles: &[&str],
    status: &str,
) {
    CollaboratorRepo::upsert(
        pool,
        &CreateCollaborator {
            project_id,
            user_id: user.id,
            role: role.to_string(),
            secondary_roles: secondary_roles.iter().map(|r| r.to_string()).collect(),
            status: status.to_string(),
        },
    )
    .await
    .expect("collaborator upsert should succeed");
}

pub async fn create_chapter(pool: &PgPool, project_id: DbId, number: i32, content: &str) -> Chapter {
    ChapterRepo::create(
        pool,
        &CreateChapter {
            project_id,
            chapter_number: number,
            title: format!("Chapter {number}"),
            content: content.to_string(),
        },
    )
    .await
    .expect("chapter creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

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
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a raw body, optionally without a `Content-Type` header.
pub async fn post_raw_auth(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
    token: &str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}
