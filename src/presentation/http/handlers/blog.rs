//! Blog Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::application::dto::request::{
    ChangeStateRequest, CreateBlogRequest, ListBlogsQuery, ListOwnBlogsQuery, UpdateBlogRequest,
};
use crate::application::dto::response::{BlogPageResponse, BlogResponse};
use crate::presentation::http::extractors::{AuthUser, OptionalAuthUser};
use crate::shared::error::AppError;
use crate::startup::AppState;

type BlogId = WithRejection<Path<i64>, AppError>;

/// List published blogs
pub async fn list_blogs(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ListBlogsQuery>, AppError>,
) -> Result<Json<BlogPageResponse>, AppError> {
    let page = state.blogs.list_published(query.into()).await?;

    Ok(Json(page.into()))
}

/// Read a single blog. Every successful read counts as a view.
pub async fn get_blog(
    State(state): State<AppState>,
    OptionalAuthUser(requester): OptionalAuthUser,
    WithRejection(Path(blog_id), _): BlogId,
) -> Result<Json<BlogResponse>, AppError> {
    let view = state.blogs.record_view(requester, blog_id).await?;

    Ok(Json(view.into()))
}

/// Create a draft blog owned by the caller
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(body), _): WithRejection<Json<CreateBlogRequest>, AppError>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    let view = state.blogs.create_blog(auth.user_id, body.into()).await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Edit title, description, tags or body
pub async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(blog_id), _): BlogId,
    WithRejection(Json(body), _): WithRejection<Json<UpdateBlogRequest>, AppError>,
) -> Result<Json<BlogResponse>, AppError> {
    let view = state
        .blogs
        .update_blog(auth.user_id, blog_id, body.into())
        .await?;

    Ok(Json(view.into()))
}

/// Publish or unpublish
pub async fn change_state(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(blog_id), _): BlogId,
    WithRejection(Json(body), _): WithRejection<Json<ChangeStateRequest>, AppError>,
) -> Result<Json<BlogResponse>, AppError> {
    let view = state
        .blogs
        .change_state(auth.user_id, blog_id, &body.state)
        .await?;

    Ok(Json(view.into()))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(blog_id), _): BlogId,
) -> Result<StatusCode, AppError> {
    state.blogs.delete_blog(auth.user_id, blog_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The caller's own blogs in any state
pub async fn list_my_blogs(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<ListOwnBlogsQuery>, AppError>,
) -> Result<Json<BlogPageResponse>, AppError> {
    let page = state.blogs.list_own(auth.user_id, query.into()).await?;

    Ok(Json(page.into()))
}
