//! Blog Service
//!
//! Owns every blog mutation: creation, edits, state transitions, deletion
//! and the read-count increment that accompanies a single-blog fetch.
//! Listings go through the query builder and the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use crate::domain::services::blog_validation::{
    normalize_description, normalize_tags, validate_new_blog, validate_patch,
};
use crate::domain::services::{AccessPolicy, BlogQueryBuilder};
use crate::domain::{
    Blog, BlogPatch, BlogQuery, BlogRepository, BlogState, Page, User, UserRepository,
};
use crate::infrastructure::metrics;
use crate::shared::error::{AppError, FieldError};
use crate::shared::snowflake::SnowflakeGenerator;

/// Blog service trait
///
/// Every operation receives the requester explicitly; `None` means anonymous.
#[async_trait]
pub trait BlogService: Send + Sync {
    /// Create a draft owned by `author_id`
    async fn create_blog(&self, author_id: i64, request: CreateBlogDto) -> Result<BlogView, BlogError>;

    /// Fetch one blog and count the read. Not idempotent: every
    /// successful call adds exactly one to `read_count`.
    async fn record_view(&self, requester: Option<i64>, blog_id: i64) -> Result<BlogView, BlogError>;

    /// Apply a partial update
    async fn update_blog(&self, requester: i64, blog_id: i64, patch: BlogPatch) -> Result<BlogView, BlogError>;

    /// Publish or unpublish
    async fn change_state(&self, requester: i64, blog_id: i64, state: &str) -> Result<BlogView, BlogError>;

    /// Permanently delete
    async fn delete_blog(&self, requester: i64, blog_id: i64) -> Result<(), BlogError>;

    /// Public listing of published blogs
    async fn list_published(&self, params: ListBlogsDto) -> Result<Page<BlogView>, BlogError>;

    /// The requester's own blogs, any state unless filtered
    async fn list_own(&self, requester: i64, params: ListOwnBlogsDto) -> Result<Page<BlogView>, BlogError>;
}

/// Create blog input
#[derive(Debug, Clone, Default)]
pub struct CreateBlogDto {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub body: String,
}

/// Public listing parameters
#[derive(Debug, Clone, Default)]
pub struct ListBlogsDto {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub author: Option<String>,
}

/// Own-blogs listing parameters
#[derive(Debug, Clone, Default)]
pub struct ListOwnBlogsDto {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub state: Option<String>,
}

/// Author display fields, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A blog together with its expanded author
#[derive(Debug, Clone)]
pub struct BlogView {
    pub blog: Blog,
    /// `None` when the author record no longer exists
    pub author: Option<AuthorSummary>,
}

/// Blog service errors
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("Blog not found")]
    NotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    fn field(field: &str, message: &str) -> Self {
        BlogError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<AppError> for BlogError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Conflict(msg) => BlogError::Conflict(msg),
            AppError::NotFound(_) => BlogError::NotFound,
            e => BlogError::Internal(e.to_string()),
        }
    }
}

impl From<BlogError> for AppError {
    fn from(e: BlogError) -> Self {
        match e {
            BlogError::NotFound => AppError::NotFound("Blog not found".into()),
            BlogError::Forbidden => AppError::Forbidden("You do not have access to this blog".into()),
            BlogError::Validation(fields) => AppError::Validation(fields),
            BlogError::Conflict(_) => AppError::Conflict("A blog with this title already exists".into()),
            BlogError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// BlogService implementation
pub struct BlogServiceImpl<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    blog_repo: Arc<B>,
    user_repo: Arc<U>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<B, U> BlogServiceImpl<B, U>
where
    B: BlogRepository,
    U: UserRepository,
{
    pub fn new(blog_repo: Arc<B>, user_repo: Arc<U>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            blog_repo,
            user_repo,
            id_generator,
        }
    }

    async fn find_blog(&self, blog_id: i64) -> Result<Blog, BlogError> {
        self.blog_repo
            .find_by_id(blog_id)
            .await?
            .ok_or(BlogError::NotFound)
    }

    /// Load the blog and make sure the requester owns it.
    async fn find_owned_blog(&self, requester: i64, blog_id: i64) -> Result<Blog, BlogError> {
        let blog = self.find_blog(blog_id).await?;
        if !AccessPolicy::can_mutate(requester, &blog) {
            tracing::debug!(blog_id, user_id = requester, "Mutation denied to non-owner");
            return Err(BlogError::Forbidden);
        }
        Ok(blog)
    }

    async fn ensure_title_available(&self, title: &str, excluding: Option<i64>) -> Result<(), BlogError> {
        if self.blog_repo.title_exists(title, excluding).await? {
            return Err(BlogError::field("title", "A blog with this title already exists"));
        }
        Ok(())
    }

    async fn expand(&self, blog: Blog) -> Result<BlogView, BlogError> {
        let author = self
            .user_repo
            .find_by_id(blog.author_id)
            .await?
            .as_ref()
            .map(AuthorSummary::from);
        Ok(BlogView { blog, author })
    }

    /// Run a listing query and expand all authors with one lookup.
    async fn fetch_page(&self, query: BlogQuery) -> Result<Page<BlogView>, BlogError> {
        if query.predicate.is_unsatisfiable() {
            return Ok(Page::new(Vec::new(), 0, query.pagination));
        }

        let total = self.blog_repo.count(&query.predicate).await?;
        let blogs = self.blog_repo.find(&query).await?;

        let mut author_ids: Vec<i64> = blogs.iter().map(|b| b.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i64, AuthorSummary> = self
            .user_repo
            .find_by_ids(&author_ids)
            .await?
            .iter()
            .map(|u| (u.id, AuthorSummary::from(u)))
            .collect();

        let page = Page::new(blogs, total, query.pagination);
        Ok(page.map(|blog| {
            let author = authors.get(&blog.author_id).cloned();
            BlogView { blog, author }
        }))
    }
}

#[async_trait]
impl<B, U> BlogService for BlogServiceImpl<B, U>
where
    B: BlogRepository + 'static,
    U: UserRepository + 'static,
{
    async fn create_blog(&self, author_id: i64, request: CreateBlogDto) -> Result<BlogView, BlogError> {
        let title = request.title.trim().to_string();
        validate_new_blog(&title, &request.body).map_err(BlogError::Validation)?;
        self.ensure_title_available(&title, None).await?;

        let blog = Blog::new(
            self.id_generator.generate(),
            author_id,
            title,
            normalize_description(request.description),
            normalize_tags(request.tags),
            request.body,
            Utc::now(),
        );

        let created = self.blog_repo.create(&blog).await?;

        metrics::record_blog_mutation("create");
        tracing::info!(blog_id = created.id, user_id = author_id, "Blog created");

        self.expand(created).await
    }

    async fn record_view(&self, requester: Option<i64>, blog_id: i64) -> Result<BlogView, BlogError> {
        let blog = self.find_blog(blog_id).await?;

        if !AccessPolicy::can_view(requester, &blog) {
            tracing::debug!(blog_id, user_id = ?requester, "Draft view denied");
            return Err(BlogError::Forbidden);
        }

        let viewed = self
            .blog_repo
            .increment_read_count(blog_id)
            .await?
            .ok_or(BlogError::NotFound)?;

        metrics::record_blog_view();

        self.expand(viewed).await
    }

    async fn update_blog(&self, requester: i64, blog_id: i64, patch: BlogPatch) -> Result<BlogView, BlogError> {
        let mut blog = self.find_owned_blog(requester, blog_id).await?;
        validate_patch(&patch).map_err(BlogError::Validation)?;

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title != blog.title {
                self.ensure_title_available(&title, Some(blog_id)).await?;
                blog.title = title;
            }
        }
        if let Some(description) = patch.description {
            blog.description = normalize_description(Some(description));
        }
        if let Some(tags) = patch.tags {
            blog.tags = normalize_tags(tags);
        }
        if let Some(body) = patch.body {
            blog.set_body(body);
        }
        blog.updated_at = Utc::now();

        let updated = self.blog_repo.update(&blog).await?;

        metrics::record_blog_mutation("update");
        tracing::info!(blog_id, user_id = requester, "Blog updated");

        self.expand(updated).await
    }

    async fn change_state(&self, requester: i64, blog_id: i64, state: &str) -> Result<BlogView, BlogError> {
        // Checked before ownership so a bad value is rejected for everyone
        let target: BlogState = state
            .parse()
            .map_err(|e: crate::domain::InvalidBlogState| BlogError::field("state", &e.to_string()))?;

        let blog = self.find_owned_blog(requester, blog_id).await?;

        if blog.state == target {
            return self.expand(blog).await;
        }

        let updated = self
            .blog_repo
            .update_state(blog_id, target)
            .await?
            .ok_or(BlogError::NotFound)?;

        metrics::record_blog_mutation(match target {
            BlogState::Published => "publish",
            BlogState::Draft => "unpublish",
        });
        tracing::info!(blog_id, user_id = requester, state = %target, "Blog state changed");

        self.expand(updated).await
    }

    async fn delete_blog(&self, requester: i64, blog_id: i64) -> Result<(), BlogError> {
        self.find_owned_blog(requester, blog_id).await?;
        self.blog_repo.delete(blog_id).await?;

        metrics::record_blog_mutation("delete");
        tracing::info!(blog_id, user_id = requester, "Blog deleted");

        Ok(())
    }

    async fn list_published(&self, params: ListBlogsDto) -> Result<Page<BlogView>, BlogError> {
        let author_ids = match params.author.as_deref().map(str::trim) {
            Some(fragment) if !fragment.is_empty() => {
                Some(self.user_repo.find_ids_by_name(fragment).await?)
            }
            _ => None,
        };

        let query = BlogQueryBuilder::published()
            .title(params.title.as_deref())
            .tags(params.tags.as_deref())
            .authors(author_ids)
            .order_by(params.order_by.as_deref())
            .page(params.page, params.limit)
            .build();

        self.fetch_page(query).await
    }

    async fn list_own(&self, requester: i64, params: ListOwnBlogsDto) -> Result<Page<BlogView>, BlogError> {
        let state = params
            .state
            .as_deref()
            .map(str::parse::<BlogState>)
            .transpose()
            .map_err(|e| BlogError::field("state", &e.to_string()))?;

        let query = BlogQueryBuilder::owned_by(requester)
            .state(state)
            .page(params.page, params.limit)
            .build();

        self.fetch_page(query).await
    }
}
