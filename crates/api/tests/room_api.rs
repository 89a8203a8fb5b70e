//! HTTP-level integration tests for the room service.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete_auth, get_auth, post_json_auth, put_json_auth};
use roomdesk_core::entity::EntityKind;
use serde_json::json;

#[tokio::test]
async fn create_applies_defaults() {
    let t = build_test_app(EntityKind::Room);

    let response = post_json_auth(t.app(), "/rooms", json!({ "name": "Sea View" }), &t.admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let room = body_json(response).await;
    assert_eq!(room["name"], "Sea View");
    assert_eq!(room["description"], "");
    assert_eq!(room["available"], true);

    let published = t.publisher.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].routing_key, "room.created");
}

#[tokio::test]
async fn create_requires_admin() {
    let t = build_test_app(EntityKind::Room);

    let response = post_json_auth(t.app(), "/rooms", json!({ "name": "Attic" }), &t.client_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(t.publisher.published().is_empty());
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let t = build_test_app(EntityKind::Room);

    let response = post_json_auth(t.app(), "/rooms", json!({ "name": "  " }), &t.admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn client_can_read_rooms() {
    let t = build_test_app(EntityKind::Room);
    let created = body_json(
        post_json_auth(t.app(), "/rooms", json!({ "name": "Loft" }), &t.admin_token()).await,
    )
    .await;

    let response = get_auth(t.app(), &format!("/rooms/{}", created["id"]), &t.client_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn update_and_filter_by_availability() {
    let t = build_test_app(EntityKind::Room);
    let admin = t.admin_token();
    for name in ["Loft", "Cellar", "Garden"] {
        post_json_auth(t.app(), "/rooms", json!({ "name": name }), &admin).await;
    }

    let response = put_json_auth(
        t.app(),
        "/rooms/2",
        json!({ "name": "Cellar", "description": "damp", "available": false }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["description"], "damp");
    assert_eq!(updated["available"], false);

    let response = get_auth(t.app(), "/rooms?available=true&sort_by=name", &admin).await;
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Garden", "Loft"]);
}

#[tokio::test]
async fn filter_value_of_wrong_type_returns_400() {
    let t = build_test_app(EntityKind::Room);

    let response = get_auth(t.app(), "/rooms?available=maybe", &t.client_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_absent_room_returns_404_and_delete_is_idempotent() {
    let t = build_test_app(EntityKind::Room);
    let admin = t.admin_token();

    let response = put_json_auth(
        t.app(),
        "/rooms/12",
        json!({ "name": "Nowhere", "available": true }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(t.app(), "/rooms/12", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
