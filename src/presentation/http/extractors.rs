//! Custom Extractors
//!
//! Axum extractors that resolve the requester's identity from a bearer token.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extracted from the bearer token. Rejects with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .await
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

        let user_id = state.auth.validate_token(&token)?;

        Ok(AuthUser { user_id })
    }
}

/// Identity for endpoints that also serve anonymous callers. A missing or
/// invalid token yields `None` rather than a rejection.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<i64>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts).await else {
            return Ok(OptionalAuthUser(None));
        };

        match state.auth.validate_token(&token) {
            Ok(user_id) => Ok(OptionalAuthUser(Some(user_id))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
                Ok(OptionalAuthUser(None))
            }
        }
    }
}

async fn bearer_token(parts: &mut Parts) -> Option<String> {
    parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}
