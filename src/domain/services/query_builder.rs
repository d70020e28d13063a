//! Translates listing parameters into a [`BlogQuery`].

use crate::domain::value_objects::{BlogPredicate, BlogQuery, BlogState, Pagination, SortKey};

/// Builder for the two listing paths: the public feed of published blogs
/// and an author's own blogs.
///
/// ```rust,ignore
/// let query = BlogQueryBuilder::published()
///     .title(Some("rust"))
///     .tags(Some("web,async"))
///     .order_by(Some("read_count"))
///     .page(Some(2), Some(10))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct BlogQueryBuilder {
    predicate: BlogPredicate,
    sort: SortKey,
    pagination: Pagination,
}

impl BlogQueryBuilder {
    /// Public listing, always restricted to published blogs.
    pub fn published() -> Self {
        Self::with_predicate(BlogPredicate {
            state: Some(BlogState::Published),
            ..Default::default()
        })
    }

    /// An author's own blogs in any state.
    pub fn owned_by(author_id: i64) -> Self {
        Self::with_predicate(BlogPredicate {
            author_id: Some(author_id),
            ..Default::default()
        })
    }

    fn with_predicate(predicate: BlogPredicate) -> Self {
        Self {
            predicate,
            sort: SortKey::default(),
            pagination: Pagination::default(),
        }
    }

    /// Narrow the owner path to one state.
    pub fn state(mut self, state: Option<BlogState>) -> Self {
        if let Some(state) = state {
            self.predicate.state = Some(state);
        }
        self
    }

    /// Case-insensitive title substring. Blank input is ignored.
    pub fn title(mut self, title: Option<&str>) -> Self {
        self.predicate.title_contains = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// Comma-separated tag list, matched with OR semantics.
    pub fn tags(mut self, tags: Option<&str>) -> Self {
        self.predicate.tags_any = tags.map(parse_tag_list).filter(|t| !t.is_empty());
        self
    }

    /// Restrict to authors resolved from a name search. An empty set
    /// means no author matched and the query yields nothing.
    pub fn authors(mut self, author_ids: Option<Vec<i64>>) -> Self {
        self.predicate.author_in = author_ids;
        self
    }

    pub fn order_by(mut self, order_by: Option<&str>) -> Self {
        self.sort = SortKey::from_param(order_by);
        self
    }

    pub fn page(mut self, page: Option<i64>, limit: Option<i64>) -> Self {
        self.pagination = Pagination::resolve(page, limit);
        self
    }

    pub fn build(self) -> BlogQuery {
        BlogQuery {
            predicate: self.predicate,
            sort: self.sort,
            pagination: self.pagination,
        }
    }
}

/// Split a comma-separated tag list, trimming entries and dropping blanks.
pub fn parse_tag_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
