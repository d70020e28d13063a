//! Blog Lifecycle API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{words, TestApp};

#[tokio::test]
async fn test_create_blog_starts_as_unread_draft() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;

    let response = app
        .post_json_auth(
            "/api/v1/blogs",
            json!({
                "title": "Notes on the Engine",
                "description": "first post",
                "tags": ["math", "engines"],
                "body": words(400),
            }),
            &author.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["state"], "draft");
    assert_eq!(response.body["read_count"], 0);
    assert_eq!(response.body["reading_time"], 2);
    assert_eq!(response.body["author_id"], author.id.as_str());
}

#[tokio::test]
async fn test_create_blog_requires_authentication() {
    let app = TestApp::new();

    let response = app
        .post_json("/api/v1/blogs", json!({ "title": "T", "body": "b" }))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_blog_missing_fields() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;

    let response = app
        .post_json_auth("/api/v1/blogs", json!({}), &author.token)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = response.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["title", "body"]);
}

#[tokio::test]
async fn test_duplicate_title_rejected() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    app.create_blog(&author, "Same Title", &[], "body").await;

    let response = app
        .post_json_auth(
            "/api/v1/blogs",
            json!({ "title": "Same Title", "body": "other" }),
            &author.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "title");
}

#[tokio::test]
async fn test_draft_visible_only_to_author() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let other = app.create_user("Charles", "Babbage").await;
    let id = app.create_blog(&author, "Draft", &[], "body").await;
    let uri = format!("/api/v1/blogs/{}", id);

    assert_eq!(app.get(&uri).await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get_auth(&uri, &other.token).await.status, StatusCode::FORBIDDEN);

    let own = app.get_auth(&uri, &author.token).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["author"]["first_name"], "Ada");
}

#[tokio::test]
async fn test_each_read_counts_one_view() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.publish_blog(&author, "Popular", &[]).await;
    let uri = format!("/api/v1/blogs/{}", id);

    let mut last = None;
    for _ in 0..3 {
        last = Some(app.get(&uri).await);
    }

    let last = last.unwrap();
    assert_eq!(last.status, StatusCode::OK);
    assert_eq!(last.body["read_count"], 3);
    assert_eq!(last.body["author"]["email"], author.email.as_str());
    assert!(last.body["author"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_invalid_token_on_public_read_is_anonymous() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.publish_blog(&author, "Open", &[]).await;

    let response = app
        .get_auth(&format!("/api/v1/blogs/{}", id), "garbage")
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new();

    assert_eq!(app.get("/api/v1/blogs/424242").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/api/v1/blogs/not-an-id").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_recomputes_reading_time_only_for_body() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.create_blog(&author, "Editable", &[], &words(10)).await;
    let uri = format!("/api/v1/blogs/{}", id);

    let retitled = app
        .patch_json_auth(&uri, json!({ "title": "Edited" }), &author.token)
        .await;
    assert_eq!(retitled.status, StatusCode::OK);
    assert_eq!(retitled.body["title"], "Edited");
    assert_eq!(retitled.body["reading_time"], 1);

    let rewritten = app
        .patch_json_auth(&uri, json!({ "body": words(401) }), &author.token)
        .await;
    assert_eq!(rewritten.status, StatusCode::OK);
    assert_eq!(rewritten.body["reading_time"], 3);
}

#[tokio::test]
async fn test_update_rejects_protected_fields() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.create_blog(&author, "Guarded", &[], "body").await;

    let response = app
        .patch_json_auth(
            &format!("/api/v1/blogs/{}", id),
            json!({ "read_count": 9999, "state": "published" }),
            &author.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = response.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["read_count", "state"]);
}

#[tokio::test]
async fn test_update_rejects_null_protected_fields() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.create_blog(&author, "Guarded", &[], "body").await;

    let response = app
        .patch_json_auth(
            &format!("/api/v1/blogs/{}", id),
            json!({ "title": "Renamed", "author": null }),
            &author.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "author");

    let unchanged = app
        .get_auth(&format!("/api/v1/blogs/{}", id), &author.token)
        .await;
    assert_eq!(unchanged.body["title"], "Guarded");
}

#[tokio::test]
async fn test_non_owner_cannot_mutate() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let other = app.create_user("Charles", "Babbage").await;
    let id = app.publish_blog(&author, "Mine", &[]).await;
    let uri = format!("/api/v1/blogs/{}", id);

    let update = app
        .patch_json_auth(&uri, json!({ "title": "Hijacked" }), &other.token)
        .await;
    let unpublish = app
        .patch_json_auth(
            &format!("{}/state", uri),
            json!({ "state": "draft" }),
            &other.token,
        )
        .await;
    let delete = app.delete_auth(&uri, &other.token).await;

    assert_eq!(update.status, StatusCode::FORBIDDEN);
    assert_eq!(unpublish.status, StatusCode::FORBIDDEN);
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let current = app.get(&uri).await;
    assert_eq!(current.body["title"], "Mine");
    assert_eq!(current.body["state"], "published");
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.publish_blog(&author, "Toggle", &[]).await;
    let state_uri = format!("/api/v1/blogs/{}/state", id);

    let again = app
        .patch_json_auth(&state_uri, json!({ "state": "published" }), &author.token)
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.body["state"], "published");

    let unpublished = app
        .patch_json_auth(&state_uri, json!({ "state": "draft" }), &author.token)
        .await;
    assert_eq!(unpublished.body["state"], "draft");
    assert_eq!(
        app.get(&format!("/api/v1/blogs/{}", id)).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_invalid_state_is_validation_error() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.create_blog(&author, "Stateful", &[], "body").await;

    let response = app
        .patch_json_auth(
            &format!("/api/v1/blogs/{}/state", id),
            json!({ "state": "archived" }),
            &author.token,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "state");
}

#[tokio::test]
async fn test_delete_blog() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let id = app.publish_blog(&author, "Ephemeral", &[]).await;
    let uri = format!("/api/v1/blogs/{}", id);

    let deleted = app.delete_auth(&uri, &author.token).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.delete_auth(&uri, &author.token).await.status, StatusCode::NOT_FOUND);
}
