//! Common Test Utilities
//!
//! Shared helpers and the in-memory test application.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use blog_api::config::Settings;
use blog_api::startup::{build_router, AppState};

/// Test application over the in-memory store
pub struct TestApp {
    pub router: Router,
}

/// Status plus parsed JSON body (`Value::Null` when the body is empty)
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// A signed-up and signed-in account
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::in_memory(Settings::for_testing());
        Self {
            router: build_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, None, Some(token)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn post_json_auth(&self, uri: &str, body: Value, token: &str) -> TestResponse {
        self.request(Method::POST, uri, Some(body), Some(token)).await
    }

    pub async fn patch_json_auth(&self, uri: &str, body: Value, token: &str) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body), Some(token)).await
    }

    pub async fn delete_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, Some(token)).await
    }

    /// Sign up a fresh account and sign in with it
    pub async fn create_user(&self, first_name: &str, last_name: &str) -> TestUser {
        let email = unique_email();
        let signup = self
            .post_json(
                "/api/v1/auth/signup",
                json!({
                    "first_name": first_name,
                    "last_name": last_name,
                    "email": email,
                    "password": TEST_PASSWORD,
                }),
            )
            .await;
        assert_eq!(signup.status, StatusCode::CREATED, "{}", signup.body);

        let signin = self
            .post_json(
                "/api/v1/auth/signin",
                json!({ "email": email, "password": TEST_PASSWORD }),
            )
            .await;
        assert_eq!(signin.status, StatusCode::OK, "{}", signin.body);

        TestUser {
            id: signup.body["id"].as_str().unwrap().to_string(),
            email,
            token: signin.body["access_token"].as_str().unwrap().to_string(),
        }
    }

    /// Create a blog and return its id
    pub async fn create_blog(&self, user: &TestUser, title: &str, tags: &[&str], body: &str) -> String {
        let response = self
            .post_json_auth(
                "/api/v1/blogs",
                json!({ "title": title, "tags": tags, "body": body }),
                &user.token,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_str().unwrap().to_string()
    }

    /// Create a blog and publish it
    pub async fn publish_blog(&self, user: &TestUser, title: &str, tags: &[&str]) -> String {
        let id = self.create_blog(user, title, tags, "some body text").await;
        let response = self
            .patch_json_auth(
                &format!("/api/v1/blogs/{}/state", id),
                json!({ "state": "published" }),
                &user.token,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        id
    }
}

pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Generate a unique test email
pub fn unique_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

/// Body of `n` words
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}
