//! Blog entity and repository trait.
//!
//! Maps to the `blogs` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::reading_time;
use crate::domain::value_objects::{BlogPredicate, BlogQuery, BlogState};
use crate::shared::error::AppError;

/// A blog post.
///
/// Maps to the `blogs` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - title: TEXT NOT NULL UNIQUE
/// - description: TEXT NULL
/// - author_id: BIGINT NOT NULL REFERENCES users(id)
/// - state: VARCHAR(16) NOT NULL DEFAULT 'draft'
/// - read_count: BIGINT NOT NULL DEFAULT 0
/// - reading_time: INTEGER NOT NULL DEFAULT 0
/// - tags: TEXT[] NOT NULL DEFAULT '{}'
/// - body: TEXT NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub author_id: i64,
    pub state: BlogState,
    /// Only ever incremented, once per authorized single-blog fetch.
    pub read_count: i64,
    /// Minutes, always derived from `body`.
    pub reading_time: i32,
    pub tags: Vec<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Build a fresh draft with `read_count = 0` and a computed reading time.
    pub fn new(
        id: i64,
        author_id: i64,
        title: String,
        description: Option<String>,
        tags: Vec<String>,
        body: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            author_id,
            state: BlogState::Draft,
            read_count: 0,
            reading_time: reading_time::reading_time(&body),
            tags,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.state == BlogState::Published
    }

    /// Replace the body and recompute the reading time.
    pub fn set_body(&mut self, body: String) {
        self.reading_time = reading_time::reading_time(&body);
        self.body = body;
    }
}

/// Partial update of a blog's editable fields.
///
/// `protected_fields` names any of `author`, `read_count` or `state` that the
/// caller tried to set; their presence makes the patch invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub body: Option<String>,
    pub protected_fields: Vec<String>,
}

impl BlogPatch {
    pub fn touches_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Repository trait for Blog data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find a blog by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError>;

    /// Check if a title is taken by any blog other than `excluding`.
    async fn title_exists(&self, title: &str, excluding: Option<i64>) -> Result<bool, AppError>;

    /// Fetch one page of blogs matching the query, sorted descending.
    async fn find(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError>;

    /// Count all blogs matching the predicate.
    async fn count(&self, predicate: &BlogPredicate) -> Result<i64, AppError>;

    /// Insert a new blog. A duplicate title yields `AppError::Conflict`.
    async fn create(&self, blog: &Blog) -> Result<Blog, AppError>;

    /// Persist title, description, tags, body and reading time.
    async fn update(&self, blog: &Blog) -> Result<Blog, AppError>;

    /// Atomically add one to `read_count`. `None` if the blog is gone.
    async fn increment_read_count(&self, id: i64) -> Result<Option<Blog>, AppError>;

    /// Atomically set the state. `None` if the blog is gone.
    async fn update_state(&self, id: i64, state: BlogState) -> Result<Option<Blog>, AppError>;

    /// Permanently remove a blog.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
