//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents an account on the blogging platform.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - first_name: VARCHAR(100) NOT NULL
/// - last_name: VARCHAR(100) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Users are never updated or deleted once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Email address (unique, stored lower-cased)
    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last", used in logs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match on first or last name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.first_name.to_lowercase().contains(&fragment)
            || self.last_name.to_lowercase().contains(&fragment)
    }
}

/// Canonical form of an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find all users with the given IDs. Missing IDs are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, AppError>;

    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// IDs of users whose first or last name contains `fragment`, ignoring case.
    async fn find_ids_by_name(&self, fragment: &str) -> Result<Vec<i64>, AppError>;

    /// Create a new user. A duplicate email yields `AppError::Conflict`.
    async fn create(&self, user: &User) -> Result<User, AppError>;
}
