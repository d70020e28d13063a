//! Storage-agnostic blog listing queries.
//!
//! A [`BlogQuery`] is what the query builder hands to a [`BlogRepository`]:
//! a predicate, a sort key and a page window. Store adapters translate the
//! predicate into their own query language; the in-memory store evaluates
//! [`BlogPredicate::matches`] directly.
//!
//! [`BlogRepository`]: crate::domain::BlogRepository

use serde::Serialize;

use super::BlogState;
use crate::domain::entities::Blog;

/// Page used when the request omits one or sends a non-positive value.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request omits one or sends a non-positive value.
pub const DEFAULT_LIMIT: i64 = 20;

/// Sort keys accepted by `order_by`. Sorting is always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    ReadCount,
    ReadingTime,
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Resolve an `order_by` parameter against the allow-list.
    ///
    /// Unknown values fall back to the default (`createdAt`).
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("read_count") => Self::ReadCount,
            Some("reading_time") => Self::ReadingTime,
            Some("createdAt") | Some("created_at") => Self::CreatedAt,
            _ => Self::default(),
        }
    }

    /// Column name in the `blogs` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::ReadCount => "read_count",
            Self::ReadingTime => "reading_time",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Conjunction of optional filters over blogs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPredicate {
    pub state: Option<BlogState>,
    pub author_id: Option<i64>,
    /// Restrict to any of these authors. `Some(vec![])` matches nothing.
    pub author_in: Option<Vec<i64>>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    /// Blog matches when it carries at least one of these tags.
    pub tags_any: Option<Vec<String>>,
}

impl BlogPredicate {
    /// True when no blog can ever satisfy the predicate.
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(&self.author_in, Some(ids) if ids.is_empty())
    }

    /// Evaluate the predicate against a single blog.
    pub fn matches(&self, blog: &Blog) -> bool {
        if let Some(state) = self.state {
            if blog.state != state {
                return false;
            }
        }
        if let Some(author_id) = self.author_id {
            if blog.author_id != author_id {
                return false;
            }
        }
        if let Some(ids) = &self.author_in {
            if !ids.contains(&blog.author_id) {
                return false;
            }
        }
        if let Some(needle) = &self.title_contains {
            if !blog.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(tags) = &self.tags_any {
            if !blog.tags.iter().any(|t| tags.contains(t)) {
                return false;
            }
        }
        true
    }
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Apply defaults to raw `page` / `limit` parameters.
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`, zero when there is nothing to page through.
    pub fn pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total - 1) / self.limit + 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// A complete listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogQuery {
    pub predicate: BlogPredicate,
    pub sort: SortKey,
    pub pagination: Pagination,
}

impl BlogQuery {
    pub fn offset(&self) -> i64 {
        self.pagination.offset()
    }

    pub fn limit(&self) -> i64 {
        self.pagination.limit
    }
}

/// One page of results plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of items in this page, not the total.
    pub count: usize,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            count: items.len(),
            items,
            total,
            page: pagination.page,
            pages: pagination.pages(total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            total: self.total,
            page: self.page,
            pages: self.pages,
        }
    }
}
