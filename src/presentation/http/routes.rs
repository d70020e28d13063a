//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::record_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(record_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes. Identity is resolved per handler by the
/// `AuthUser` / `OptionalAuthUser` extractors.
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .merge(blog_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/signin", post(handlers::auth::signin))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs",
            get(handlers::blog::list_blogs).post(handlers::blog::create_blog),
        )
        .route(
            "/blogs/{blog_id}",
            get(handlers::blog::get_blog)
                .patch(handlers::blog::update_blog)
                .delete(handlers::blog::delete_blog),
        )
        .route("/blogs/{blog_id}/state", patch(handlers::blog::change_state))
        .route("/me/blogs", get(handlers::blog::list_my_blogs))
}
