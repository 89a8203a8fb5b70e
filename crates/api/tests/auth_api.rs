//! HTTP-level integration tests for registration, login and token checks.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, get_auth, post_json, TestApp};
use roomdesk_api::auth::jwt::validate_token;
use roomdesk_core::entity::EntityKind;
use serde_json::json;

const PASSWORD: &str = "correct horse battery";

async fn register(t: &TestApp, email: &str) -> serde_json::Value {
    let body = json!({
        "fname": "Grace",
        "sname": "Hopper",
        "email": email,
        "password": PASSWORD,
    });
    let response = post_json(t.app(), "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_creates_inactive_client() {
    let t = build_test_app(EntityKind::Client);

    let client = register(&t, "grace@example.com").await;

    assert_eq!(client["user_role"], "client");
    assert_eq!(client["activated"], false);
    assert!(client.get("password_hash").is_none());
    assert_eq!(t.publisher.published().len(), 1);
}

#[tokio::test]
async fn register_duplicate_email_returns_409() {
    let t = build_test_app(EntityKind::Client);
    register(&t, "grace@example.com").await;

    let body = json!({
        "fname": "Grace",
        "sname": "Hopper",
        "email": "grace@example.com",
        "password": PASSWORD,
    });
    let response = post_json(t.app(), "/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token_for_the_client() {
    let t = build_test_app(EntityKind::Client);
    let client = register(&t, "grace@example.com").await;

    let body = json!({ "email": "grace@example.com", "password": PASSWORD });
    let response = post_json(t.app(), "/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["expires_in"].is_number());
    assert_eq!(json["client"]["id"], client["id"]);

    let claims = validate_token(json["access_token"].as_str().unwrap(), &t.config.jwt).unwrap();
    assert_eq!(json!(claims.sub), client["id"]);
    assert_eq!(claims.role, "client");

    // The issued token opens the client-level routes.
    let token = json["access_token"].as_str().unwrap();
    let response = get_auth(t.app(), "/clients", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let t = build_test_app(EntityKind::Client);
    register(&t, "grace@example.com").await;

    let wrong_password = post_json(
        t.app(),
        "/auth/login",
        json!({ "email": "grace@example.com", "password": "not the password" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown = post_json(
        t.app(),
        "/auth/login",
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong_password, unknown);
    assert_eq!(unknown["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Token checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_returns_401() {
    let t = build_test_app(EntityKind::Client);

    let response = get(t.app(), "/clients").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn unknown_role_in_token_returns_401() {
    let t = build_test_app(EntityKind::Client);
    let token = t.token(5, "x@example.com", "superuser");

    let response = get_auth(t.app(), "/clients", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
