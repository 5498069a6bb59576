use std::sync::{Arc, OnceLock};
use std::time::Duration;

use aula_core::auth::memory::{MemoryCredentialStore, MemoryRevocationStore};
use aula_core::auth::password::hash_password;
use aula_core::auth::session::SessionController;
use aula_core::auth::token::TokenConfig;
use aula_core::identity::Identity;
use aula_core::roles::Role;
use aula_core::types::DbId;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use aula_api::config::ServerConfig;
use aula_api::routes;
use aula_api::state::AppState;

/// Password shared by every fixture account.
pub const PASSWORD: &str = "clave-segura-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        prune_interval_secs: 3600,
        token: TokenConfig::new("integration-test-secret"),
    }
}

fn shared_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).expect("hashing should succeed"))
}

fn person(id: DbId, username: &str, role: Role, institution_id: Option<DbId>) -> Identity {
    Identity {
        id,
        username: username.to_string(),
        email: format!("{username}@example.edu"),
        password_hash: shared_hash().to_string(),
        role,
        institution_id,
        is_active: true,
    }
}

/// Fixture accounts.
///
/// | id | username | role     | institution | active |
/// |----|----------|----------|-------------|--------|
/// | 1  | ana      | STUDENT  | 1           | yes    |
/// | 2  | luis     | DIRECTOR | 1           | yes    |
/// | 3  | marta    | TEACHER  | 1           | yes    |
/// | 4  | pedro    | STUDENT  | 2           | yes    |
/// | 5  | rosa     | TEACHER  | 3           | no     |
/// | 6  | sofia    | DIRECTOR | --          | yes    |
pub fn roster() -> Vec<Identity> {
    let mut rosa = person(5, "rosa", Role::Teacher, Some(3));
    rosa.is_active = false;

    vec![
        person(1, "ana", Role::Student, Some(1)),
        person(2, "luis", Role::Director, Some(1)),
        person(3, "marta", Role::Teacher, Some(1)),
        person(4, "pedro", Role::Student, Some(2)),
        rosa,
        person(6, "sofia", Role::Director, None),
    ]
}

/// Build the full application router with all middleware layers over
/// in-memory stores seeded with [`roster`].
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();

    let sessions = SessionController::new(
        config.token.clone(),
        Arc::new(MemoryCredentialStore::with_identities(roster())),
        Arc::new(MemoryRevocationStore::new()),
    );

    let state = AppState {
        sessions: Arc::new(sessions),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST with no body and no `Content-Type`, optionally authenticated.
pub async fn post_empty(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in through the API and return the full login response.
pub async fn login(app: Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Log in as `username` with the shared password and return the access token.
pub async fn access_token_for(app: Router, username: &str) -> String {
    let json = login(app, username, PASSWORD).await;
    json["access"].as_str().unwrap().to_string()
}
