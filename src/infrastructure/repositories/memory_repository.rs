//! In-Memory Repository Implementations
//!
//! Process-local stores used for `storage.backend = "memory"` and by the
//! test suites. Each operation runs under a single lock, which gives the
//! same per-record atomicity the PostgreSQL implementations get from
//! single-statement updates. Unique constraints on `users.email` and
//! `blogs.title` are enforced here as well.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    Blog, BlogPredicate, BlogQuery, BlogRepository, BlogState, SortKey, User, UserRepository,
};
use crate::shared::error::AppError;

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, AppError> {
        let users = self.users.read();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.read().values().any(|u| u.email == email))
    }

    async fn find_ids_by_name(&self, fragment: &str) -> Result<Vec<i64>, AppError> {
        Ok(self
            .users
            .read()
            .values()
            .filter(|u| u.name_contains(fragment))
            .map(|u| u.id)
            .collect())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}

/// In-memory blog store.
#[derive(Debug, Default)]
pub struct InMemoryBlogRepository {
    blogs: RwLock<HashMap<i64, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blogs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blogs.read().is_empty()
    }
}

fn title_taken(blogs: &HashMap<i64, Blog>, title: &str, excluding: Option<i64>) -> bool {
    blogs
        .values()
        .any(|b| b.title == title && Some(b.id) != excluding)
}

/// Descending by sort key, then by id so equal keys keep a stable order.
fn compare_desc(sort: SortKey, a: &Blog, b: &Blog) -> Ordering {
    let primary = match sort {
        SortKey::ReadCount => b.read_count.cmp(&a.read_count),
        SortKey::ReadingTime => b.reading_time.cmp(&a.reading_time),
        SortKey::CreatedAt => b.created_at.cmp(&a.created_at),
    };
    primary.then_with(|| b.id.cmp(&a.id))
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Blog>, AppError> {
        Ok(self.blogs.read().get(&id).cloned())
    }

    async fn title_exists(&self, title: &str, excluding: Option<i64>) -> Result<bool, AppError> {
        Ok(title_taken(&self.blogs.read(), title, excluding))
    }

    async fn find(&self, query: &BlogQuery) -> Result<Vec<Blog>, AppError> {
        let blogs = self.blogs.read();
        let mut matching: Vec<&Blog> = blogs
            .values()
            .filter(|b| query.predicate.matches(b))
            .collect();
        matching.sort_by(|a, b| compare_desc(query.sort, a, b));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, predicate: &BlogPredicate) -> Result<i64, AppError> {
        let count = self
            .blogs
            .read()
            .values()
            .filter(|b| predicate.matches(b))
            .count();
        Ok(count as i64)
    }

    async fn create(&self, blog: &Blog) -> Result<Blog, AppError> {
        let mut blogs = self.blogs.write();
        if title_taken(&blogs, &blog.title, None) {
            return Err(AppError::Conflict(
                "Blog with this title already exists".to_string(),
            ));
        }
        blogs.insert(blog.id, blog.clone());
        Ok(blog.clone())
    }

    async fn update(&self, blog: &Blog) -> Result<Blog, AppError> {
        let mut blogs = self.blogs.write();
        if title_taken(&blogs, &blog.title, Some(blog.id)) {
            return Err(AppError::Conflict(
                "Blog with this title already exists".to_string(),
            ));
        }
        let stored = blogs
            .get_mut(&blog.id)
            .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", blog.id)))?;

        // Only the editable columns change, like the SQL UPDATE
        stored.title = blog.title.clone();
        stored.description = blog.description.clone();
        stored.tags = blog.tags.clone();
        stored.body = blog.body.clone();
        stored.reading_time = blog.reading_time;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn increment_read_count(&self, id: i64) -> Result<Option<Blog>, AppError> {
        let mut blogs = self.blogs.write();
        Ok(blogs.get_mut(&id).map(|blog| {
            blog.read_count += 1;
            blog.clone()
        }))
    }

    async fn update_state(&self, id: i64, state: BlogState) -> Result<Option<Blog>, AppError> {
        let mut blogs = self.blogs.write();
        Ok(blogs.get_mut(&id).map(|blog| {
            blog.state = state;
            blog.updated_at = Utc::now();
            blog.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.blogs
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", id)))
    }
}
