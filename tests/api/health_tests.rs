//! Health Check and Metrics API Tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_memory_backend() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["checks"]["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_use_route_templates() {
    let app = TestApp::new();
    app.get("/api/v1/blogs/12345").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let text = response.body.as_str().unwrap();
    assert!(text.contains("blog_api_http_requests_total"));
    assert!(text.contains("/api/v1/blogs/{blog_id}"));
    assert!(!text.contains("/api/v1/blogs/12345"));
}
