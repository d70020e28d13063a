//! Blog Listing API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::TestApp;

fn titles(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_public_listing_hides_drafts() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    app.publish_blog(&author, "Visible", &[]).await;
    app.create_blog(&author, "Hidden", &[], "body").await;

    let response = app.get_auth("/api/v1/blogs", &author.token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(&response.body), vec!["Visible"]);
    assert_eq!(response.body["total"], 1);
}

#[tokio::test]
async fn test_pagination_metadata() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    for i in 0..5 {
        app.publish_blog(&author, &format!("Post {}", i), &[]).await;
    }

    let second = app.get("/api/v1/blogs?page=2&limit=2").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["count"], 2);
    assert_eq!(second.body["total"], 5);
    assert_eq!(second.body["page"], 2);
    assert_eq!(second.body["pages"], 3);

    let beyond = app.get("/api/v1/blogs?page=9&limit=2").await;
    assert_eq!(beyond.body["count"], 0);
    assert_eq!(beyond.body["total"], 5);
}

#[tokio::test]
async fn test_limit_at_integer_max() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    app.publish_blog(&author, "One", &[]).await;
    app.publish_blog(&author, "Two", &[]).await;

    let response = app.get("/api/v1/blogs?limit=9223372036854775807").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 2);
    assert_eq!(response.body["pages"], 1);
}

#[tokio::test]
async fn test_newest_first_by_default() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    app.publish_blog(&author, "First", &[]).await;
    app.publish_blog(&author, "Second", &[]).await;

    let response = app.get("/api/v1/blogs").await;

    assert_eq!(titles(&response.body), vec!["Second", "First"]);
}

#[tokio::test]
async fn test_order_by_read_count() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let popular = app.publish_blog(&author, "Popular", &[]).await;
    app.publish_blog(&author, "Quiet", &[]).await;
    for _ in 0..2 {
        app.get(&format!("/api/v1/blogs/{}", popular)).await;
    }

    let response = app.get("/api/v1/blogs?order_by=read_count").await;

    assert_eq!(titles(&response.body), vec!["Popular", "Quiet"]);
}

#[tokio::test]
async fn test_tag_filter_matches_any() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    app.publish_blog(&author, "Rusty", &["rust"]).await;
    app.publish_blog(&author, "Webby", &["web"]).await;
    app.publish_blog(&author, "Other", &["cooking"]).await;

    let response = app.get("/api/v1/blogs?tags=rust,web").await;

    let mut found = titles(&response.body);
    found.sort();
    assert_eq!(found, vec!["Rusty", "Webby"]);
}

#[tokio::test]
async fn test_title_filter_is_case_insensitive() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    app.publish_blog(&author, "Learning Rust", &[]).await;
    app.publish_blog(&author, "Baking Bread", &[]).await;

    let response = app.get("/api/v1/blogs?title=rUsT").await;

    assert_eq!(titles(&response.body), vec!["Learning Rust"]);
}

#[tokio::test]
async fn test_author_filter_by_name() {
    let app = TestApp::new();
    let ada = app.create_user("Ada", "Lovelace").await;
    let charles = app.create_user("Charles", "Babbage").await;
    app.publish_blog(&ada, "By Ada", &[]).await;
    app.publish_blog(&charles, "By Charles", &[]).await;

    let by_name = app.get("/api/v1/blogs?author=babb").await;
    assert_eq!(titles(&by_name.body), vec!["By Charles"]);

    let nobody = app.get("/api/v1/blogs?author=nobody").await;
    assert_eq!(nobody.body["total"], 0);
    assert_eq!(nobody.body["pages"], 0);
}

#[tokio::test]
async fn test_own_listing_includes_drafts_and_filters_state() {
    let app = TestApp::new();
    let author = app.create_user("Ada", "Lovelace").await;
    let other = app.create_user("Charles", "Babbage").await;
    app.publish_blog(&author, "Live", &[]).await;
    app.create_blog(&author, "Pending", &[], "body").await;
    app.publish_blog(&other, "Not mine", &[]).await;

    let all = app.get_auth("/api/v1/me/blogs", &author.token).await;
    assert_eq!(all.body["total"], 2);

    let drafts = app
        .get_auth("/api/v1/me/blogs?state=draft", &author.token)
        .await;
    assert_eq!(titles(&drafts.body), vec!["Pending"]);

    let invalid = app
        .get_auth("/api/v1/me/blogs?state=archived", &author.token)
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}
