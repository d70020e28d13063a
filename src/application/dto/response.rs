//! Response DTOs
//!
//! Data structures for API response bodies. Snowflake ids are rendered as
//! strings so JavaScript clients do not lose precision.

use serde::Serialize;

use crate::application::services::{AccessToken, AuthorSummary, BlogView};
use crate::domain::{Page, User};

/// Account response. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Signin response (user plus bearer token)
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl SigninResponse {
    pub fn new(user: User, token: AccessToken) -> Self {
        Self {
            user: user.into(),
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Author display fields embedded in blog responses
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<AuthorSummary> for AuthorResponse {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id.to_string(),
            first_name: author.first_name,
            last_name: author.last_name,
            email: author.email,
        }
    }
}

/// Blog response
#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub author_id: String,
    pub author: Option<AuthorResponse>,
    pub state: String,
    pub read_count: i64,
    pub reading_time: i32,
    pub tags: Vec<String>,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BlogView> for BlogResponse {
    fn from(view: BlogView) -> Self {
        let blog = view.blog;
        Self {
            id: blog.id.to_string(),
            title: blog.title,
            description: blog.description,
            author_id: blog.author_id.to_string(),
            author: view.author.map(AuthorResponse::from),
            state: blog.state.as_str().to_string(),
            read_count: blog.read_count,
            reading_time: blog.reading_time,
            tags: blog.tags,
            body: blog.body,
            created_at: blog.created_at.to_rfc3339(),
            updated_at: blog.updated_at.to_rfc3339(),
        }
    }
}

/// Paged blog listing
pub type BlogPageResponse = Page<BlogResponse>;

impl From<Page<BlogView>> for BlogPageResponse {
    fn from(page: Page<BlogView>) -> Self {
        page.map(BlogResponse::from)
    }
}
