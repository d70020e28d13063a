//! Authentication Handlers

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::application::dto::request::{SigninRequest, SignupRequest};
use crate::application::dto::response::{SigninResponse, UserResponse};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Register a new account
pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SignupRequest>, AppError>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let user = state.auth.signup(body.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchange email and password for a bearer token
pub async fn signin(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SigninRequest>, AppError>,
) -> Result<Json<SigninResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let (user, token) = state.auth.signin(&body.email, &body.password).await?;

    Ok(Json(SigninResponse::new(user, token)))
}
