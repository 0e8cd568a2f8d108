//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_checks_answer_without_token() {
    let app = common::TestApp::new().await;

    for (path, expected) in [("/health", "healthy"), ("/health/live", "alive")] {
        let (status, body) = app.get(path).await;
        assert_eq!(status, StatusCode::OK);

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["status"], expected);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_reports_database() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "healthy");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_api_v1_root() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/api/v1/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Task Manager API v1"));
}
