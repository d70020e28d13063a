//! Authentication API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{unique_email, TestApp, TEST_PASSWORD};

fn signup_body(email: &str) -> serde_json::Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": TEST_PASSWORD,
    })
}

#[tokio::test]
async fn test_signup_with_valid_data() {
    let app = TestApp::new();
    let email = unique_email();

    let response = app.post_json("/api/v1/auth/signup", signup_body(&email)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], email.as_str());
    assert_eq!(response.body["first_name"], "Ada");
    assert!(response.body.get("password_hash").is_none());
    assert!(response.body.get("password").is_none());
}

#[tokio::test]
async fn test_signup_with_invalid_email_fails() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/v1/auth/signup", signup_body("not-an-email"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_signup_with_short_password_fails() {
    let app = TestApp::new();
    let mut body = signup_body(&unique_email());
    body["password"] = json!("short");

    let response = app.post_json("/api/v1/auth/signup", body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn test_signup_with_duplicate_email_fails() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_json("/api/v1/auth/signup", signup_body(&email)).await;

    let response = app
        .post_json("/api/v1/auth/signup", signup_body(&email.to_uppercase()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn test_signin_returns_bearer_token() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_json("/api/v1/auth/signup", signup_body(&email)).await;

    let response = app
        .post_json(
            "/api/v1/auth/signin",
            json!({ "email": email, "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "Bearer");
    assert_eq!(response.body["expires_in"], 3600);
    assert!(response.body["access_token"].as_str().is_some());
    assert_eq!(response.body["user"]["email"], email.as_str());
}

#[tokio::test]
async fn test_signin_failures_are_indistinguishable() {
    let app = TestApp::new();
    let email = unique_email();
    app.post_json("/api/v1/auth/signup", signup_body(&email)).await;

    let wrong_password = app
        .post_json(
            "/api/v1/auth/signin",
            json!({ "email": email, "password": "WrongPassword!" }),
        )
        .await;
    let unknown_email = app
        .post_json(
            "/api/v1/auth/signin",
            json!({ "email": unique_email(), "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new();

    let missing = app.get("/api/v1/me/blogs").await;
    let garbage = app.get_auth("/api/v1/me/blogs", "not-a-token").await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            axum::http::Method::POST,
            "/api/v1/auth/signin",
            Some(json!("just a string")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
