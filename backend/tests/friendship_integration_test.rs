//! Integration tests for friendship endpoints

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "requires database"]
async fn test_request_and_accept() {
    let app = common::TestApp::new().await;
    let alice = app.register_and_login("user").await;
    let bob = app.register_and_login("user").await;

    let (status, body) = app
        .send_auth(Method::POST, "/api/v1/friends", &alice.token, Some(json!({ "friend_id": bob.id })))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let friendship: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(friendship["status"], "pending");

    // Only the addressee can decide
    let (status, _) = app
        .send_auth(Method::POST, "/api/v1/friends/accept", &alice.token, Some(json!({ "user_id": bob.id })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send_auth(Method::POST, "/api/v1/friends/accept", &bob.token, Some(json!({ "user_id": alice.id })))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let friendship: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(friendship["status"], "accepted");

    // Decisions are final
    let (status, _) = app
        .send_auth(Method::POST, "/api/v1/friends/reject", &bob.token, Some(json!({ "user_id": alice.id })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_request_and_reject() {
    let app = common::TestApp::new().await;
    let alice = app.register_and_login("user").await;
    let bob = app.register_and_login("admin").await;

    app.send_auth(Method::POST, "/api/v1/friends", &alice.token, Some(json!({ "friend_id": bob.id })))
        .await;

    let (status, body) = app
        .send_auth(Method::POST, "/api/v1/friends/reject", &bob.token, Some(json!({ "user_id": alice.id })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let friendship: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(friendship["status"], "rejected");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_invalid_requests() {
    let app = common::TestApp::new().await;
    let alice = app.register_and_login("user").await;
    let bob = app.register_and_login("user").await;

    let (status, _) = app
        .send_auth(Method::POST, "/api/v1/friends", &alice.token, Some(json!({ "friend_id": alice.id })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send_auth(Method::POST, "/api/v1/friends", &alice.token, Some(json!({ "friend_id": i64::MAX })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send_auth(Method::POST, "/api/v1/friends", &alice.token, Some(json!({ "friend_id": bob.id })))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send_auth(Method::POST, "/api/v1/friends", &alice.token, Some(json!({ "friend_id": bob.id })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_friend_routes_require_token() {
    let app = common::TestApp::new().await;

    let (status, body) = app.post("/api/v1/friends", &json!({ "friend_id": 1 }).to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("missing token"));
}
