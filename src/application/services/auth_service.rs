//! Authentication Service
//!
//! Handles account signup, signin and bearer token validation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::credential_service::{AccessToken, CredentialError, CredentialService};
use crate::domain::{normalize_email, User, UserRepository};
use crate::infrastructure::metrics;
use crate::shared::error::{AppError, FieldError};
use crate::shared::snowflake::SnowflakeGenerator;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account
    async fn signup(&self, request: SignupDto) -> Result<User, AuthError>;

    /// Authenticate with email and password
    async fn signin(&self, email: &str, password: &str) -> Result<(User, AccessToken), AuthError>;

    /// Validate an access token and extract the user ID
    fn validate_token(&self, access_token: &str) -> Result<i64, AuthError>;
}

/// Signup input, already shape-checked by the transport layer
#[derive(Debug, Clone)]
pub struct SignupDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Email already exists")]
    EmailConflict,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CredentialError> for AuthError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::TokenExpired => AuthError::TokenExpired,
            CredentialError::InvalidToken => AuthError::InvalidToken,
            CredentialError::Internal(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::TokenExpired => AppError::Unauthorized("Token expired".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid token".into()),
            AuthError::Validation(fields) => AppError::Validation(fields),
            AuthError::EmailConflict => {
                AppError::Conflict("User with this email already exists".into())
            }
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    credentials: CredentialService,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(
        user_repo: Arc<U>,
        credentials: CredentialService,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            user_repo,
            credentials,
            id_generator,
        }
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn signup(&self, request: SignupDto) -> Result<User, AuthError> {
        let email = normalize_email(&request.email);

        if self
            .user_repo
            .email_exists(&email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            metrics::record_auth_attempt("signup", "duplicate_email");
            return Err(AuthError::Validation(vec![FieldError::new(
                "email",
                "Email is already registered",
            )]));
        }

        let credentials = self.credentials.clone();
        let password = request.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || credentials.hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))??;

        let now = Utc::now();
        let user = User {
            id: self.id_generator.generate(),
            email,
            password_hash,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        let created = self.user_repo.create(&user).await.map_err(|e| match e {
            AppError::Conflict(_) => AuthError::EmailConflict,
            e => AuthError::Internal(e.to_string()),
        })?;

        metrics::record_auth_attempt("signup", "success");
        tracing::info!(user_id = created.id, name = %created.full_name(), "User signed up");

        Ok(created)
    }

    async fn signin(&self, email: &str, password: &str) -> Result<(User, AccessToken), AuthError> {
        let user = match self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            Some(user) => user,
            None => {
                metrics::record_auth_attempt("signin", "failure");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let credentials = self.credentials.clone();
        let password = password.to_string();
        let password_hash = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || credentials.verify_password(&password, &password_hash))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))??;

        if !verified {
            metrics::record_auth_attempt("signin", "failure");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.credentials.issue_token(user.id)?;

        metrics::record_auth_attempt("signin", "success");
        tracing::debug!(user_id = user.id, "User signed in");

        Ok((user, token))
    }

    fn validate_token(&self, access_token: &str) -> Result<i64, AuthError> {
        Ok(self.credentials.verify_token(access_token)?)
    }
}
