#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use roomdesk_api::auth::jwt::generate_access_token;
use roomdesk_api::config::ServerConfig;
use roomdesk_api::router::build_app_router;
use roomdesk_api::state::AppState;
use roomdesk_core::entity::EntityKind;
use roomdesk_db::memory::MemoryStore;
use roomdesk_events::{OutboxDispatcher, RecordingPublisher};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Delivery attempts before the relay gives up on an outbox row.
pub const TEST_MAX_ATTEMPTS: i32 = 3;

/// Build a test `ServerConfig` for `service` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(service: EntityKind) -> ServerConfig {
    test_config_with(service, &[])
}

/// Like [`test_config`], with `overrides` taking precedence.
pub fn test_config_with(service: EntityKind, overrides: &[(&str, &str)]) -> ServerConfig {
    ServerConfig::from_lookup(service, |var| {
        if let Some((_, value)) = overrides.iter().find(|(name, _)| *name == var) {
            return Some(value.to_string());
        }
        match var {
            "JWT_SECRET" => Some(TEST_JWT_SECRET.to_string()),
            "DATABASE_URL" => Some("postgres://localhost/roomdesk_test".to_string()),
            "MESSAGING_ENABLED" => Some("false".to_string()),
            "OUTBOX_MAX_ATTEMPTS" => Some(TEST_MAX_ATTEMPTS.to_string()),
            _ => None,
        }
    })
    .expect("test config should load")
}

/// Everything a test needs to drive one service and inspect its side effects.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: Arc<ServerConfig>,
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub dispatcher: Arc<OutboxDispatcher>,
}

impl TestApp {
    /// A fresh router sharing this app's state.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn admin_token(&self) -> String {
        self.token(1, "admin@example.com", "admin")
    }

    pub fn client_token(&self) -> String {
        self.token(2, "client@example.com", "client")
    }

    pub fn token(&self, client_id: i64, email: &str, role: &str) -> String {
        generate_access_token(client_id, email, role, &self.config.jwt)
            .expect("token generation should succeed")
    }
}

/// Build the full application router for `service` over an in-memory store
/// and a recording publisher.
///
/// Uses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(service: EntityKind) -> TestApp {
    build_test_app_with(service, &[])
}

/// [`build_test_app`] over a config with `overrides` applied.
pub fn build_test_app_with(service: EntityKind, overrides: &[(&str, &str)]) -> TestApp {
    let config = Arc::new(test_config_with(service, overrides));
    let store = Arc::new(MemoryStore::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let dispatcher = Arc::new(OutboxDispatcher::new(
        publisher.clone(),
        store.clone(),
        config.outbox_max_attempts,
        config.publish_timeout(),
    ));

    let state = AppState::new(config.clone(), store.clone(), dispatcher.clone());
    let router = build_app_router(state.clone(), &config).expect("router should build");

    TestApp {
        router,
        state,
        config,
        store,
        publisher,
        dispatcher,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
