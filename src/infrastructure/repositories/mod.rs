//! Repository Implementations
//!
//! Concrete implementations of the repository traits defined in the domain
//! layer.
//!
//! ## Available Repositories
//!
//! - **PgUserRepository** / **PgBlogRepository** - PostgreSQL backed
//! - **InMemoryUserRepository** / **InMemoryBlogRepository** - process-local,
//!   selected with `storage.backend = "memory"`
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgBlogRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let blog_repo = PgBlogRepository::new(pool);
//! }
//! ```

pub mod blog_repository;
pub mod memory_repository;
pub mod user_repository;

pub use blog_repository::PgBlogRepository;
pub use memory_repository::{InMemoryBlogRepository, InMemoryUserRepository};
pub use user_repository::PgUserRepository;

use crate::shared::error::AppError;

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Map a unique constraint violation to `Conflict`, anything else to `Database`.
pub(crate) fn map_unique_violation(e: sqlx::Error, conflict_message: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(conflict_message.to_string())
        }
        _ => AppError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("rust", "rust" ; "plain")]
    #[test_case("100%", "100\\%" ; "percent")]
    #[test_case("snake_case", "snake\\_case" ; "underscore")]
    #[test_case("a\\b", "a\\\\b" ; "backslash")]
    fn test_escape_like(input: &str, expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[test]
    fn test_non_unique_errors_stay_database_errors() {
        let err = map_unique_violation(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, AppError::Database(_)));
    }
}
