//! Blog Repository Implementation
//!
//! PostgreSQL implementation of the BlogRepository trait. Listing queries
//! are assembled with `sqlx::QueryBuilder` from a `BlogPredicate`, so every
//! user-supplied value travels as a bind parameter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{escape_like, map_unique_violation};
use crate::domain::{Blog, BlogPredicate, BlogQuery, BlogRepository, BlogState};
use crate::shared::error::AppError;

/// Row shape of the `blogs` table.
#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    description: Option<String>,
    author_id: i64,
    state: String,
    read_count: i64,
    reading_time: i32,
    tags: Vec<String>,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BlogRow> for Blog {
    type Error = AppError;

    fn try_from(row: BlogRow) -> Result<Self, Self::Error> {
        let state = row
            .state
            .parse::<BlogState>()
            .map_err(|e| AppError::Internal(format!("Blog {} has {}", row.id, e)))?;

        Ok(Blog {
            id: row.id,
            title: row.title,
            description: row.description,
            author_id: row.author_id,
            state,
            read_count: row.read_count,
            reading_time: row.reading_time,
            tags: row.tags,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const BLOG_COLUMNS: &str = "id, title, description, author_id, state, read_count, \
                            reading_time, tags, body, created_at, updated_at";

const TITLE_CONFLICT: &str = "Blog with this title already exists";

fn into_blogs(rows: Vec<BlogRow>) -> Result<Vec<Blog>, AppError> {
    rows.into_iter().map(Blog::try_from).collect()
}

/// Append the WHERE clause for `predicate`.
fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &BlogPredicate) {
    qb.push(" WHERE TRUE");

    if let Some(state) = predicate.state {
        qb.push(" AND state = ").push_bind(state.as_str());
    }
    if let Some(author_id) = predicate.author_id {
        qb.push(" AND author_id = ").push_bind(author_id);
    }
    if let Some(ids) = &predicate.author_in {
        qb.push(" AND author_id = ANY(").push_bind(ids.clone()).push(")");
    }
    if let Some(title) = &predicate.title_contains {
        qb.push(" AND title ILIKE ")
            .push_bind(format!("%{}%", escape_like(title)))
            .push(" ESCAPE '\\'");
    }
    if let Some(tags) = &predicate.tags_any {
        qb.push(" AND tags && ").push_bind(tags.clone());
    }
}

fn select_query(query: &BlogQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {BLOG_COLUMNS} FROM blogs"));
    push_predicate(&mut qb, &query.predicate);
    qb.push(format!(" ORDER BY {} DESC, id DESC", query.sort.column()));
    qb.push(" LIMIT ").push_bind(query.limit());
    qb.push(" OFFSET ").push_bind(query.offset());
    qb
}

fn count_query(predicate: &BlogPredicate) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM blogs");
    push_predicate(&mut qb, predicate);
    qb
}

/// PostgreSQL blog repository implementation.
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Blog::try_from).transpose()
    }

    async fn title_exists(&self, title: &str, excluding: Option<i64>) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM blogs
                WHERE title = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(title)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError> {
        let rows = select_query(query)
            .build_query_as::<BlogRow>()
            .fetch_all(&self.pool)
            .await?;

        into_blogs(rows)
    }

    async fn count(&self, predicate: &BlogPredicate) -> Result<i64, AppError> {
        let total = count_query(predicate)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn create(&self, blog: &Blog) -> Result<Blog, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            INSERT INTO blogs (id, title, description, author_id, state, read_count,
                               reading_time, tags, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.description)
        .bind(blog.author_id)
        .bind(blog.state.as_str())
        .bind(blog.read_count)
        .bind(blog.reading_time)
        .bind(&blog.tags)
        .bind(&blog.body)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, TITLE_CONFLICT))?;

        row.try_into()
    }

    async fn update(&self, blog: &Blog) -> Result<Blog, AppError> {
        // author_id, state and read_count are never written here
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            UPDATE blogs
            SET title = $2,
                description = $3,
                tags = $4,
                body = $5,
                reading_time = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.description)
        .bind(&blog.tags)
        .bind(&blog.body)
        .bind(blog.reading_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, TITLE_CONFLICT))?
        .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", blog.id)))?;

        row.try_into()
    }

    async fn increment_read_count(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "UPDATE blogs SET read_count = read_count + 1 WHERE id = $1 RETURNING {BLOG_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Blog::try_from).transpose()
    }

    async fn update_state(&self, id: i64, state: BlogState) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            r#"
            UPDATE blogs SET state = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(state.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Blog::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Blog with id {} not found", id)));
        }

        Ok(())
    }
}
