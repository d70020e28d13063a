//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;

use crate::application::services::{CreateBlogDto, ListBlogsDto, ListOwnBlogsDto, SignupDto};
use crate::domain::services::blog_validation::PROTECTED_FIELDS;
use crate::domain::BlogPatch;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl From<SignupRequest> for SignupDto {
    fn from(req: SignupRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create blog request. Required fields default to empty so that a missing
/// title or body surfaces as a field error rather than a parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub body: String,
}

impl From<CreateBlogRequest> for CreateBlogDto {
    fn from(req: CreateBlogRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            tags: req.tags,
            body: req.body,
        }
    }
}

/// Partial blog update.
///
/// `author`, `read_count` and `state` are accepted here only so their
/// presence can be reported; they are never applied.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub body: Option<String>,

    #[serde(default, alias = "author_id", deserialize_with = "present")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub read_count: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub state: Option<Value>,
}

/// `Some` whenever the key is in the body, including an explicit `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<UpdateBlogRequest> for BlogPatch {
    fn from(req: UpdateBlogRequest) -> Self {
        let supplied = [req.author.is_some(), req.read_count.is_some(), req.state.is_some()];
        let protected_fields = PROTECTED_FIELDS
            .iter()
            .zip(supplied)
            .filter(|(_, supplied)| *supplied)
            .map(|(field, _)| field.to_string())
            .collect();

        BlogPatch {
            title: req.title,
            description: req.description,
            tags: req.tags,
            body: req.body,
            protected_fields,
        }
    }
}

/// State transition request
#[derive(Debug, Deserialize)]
pub struct ChangeStateRequest {
    #[serde(default)]
    pub state: String,
}

/// Public listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListBlogsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub author: Option<String>,
}

impl From<ListBlogsQuery> for ListBlogsDto {
    fn from(q: ListBlogsQuery) -> Self {
        Self {
            page: q.page,
            limit: q.limit,
            order_by: q.order_by,
            title: q.title,
            tags: q.tags,
            author: q.author,
        }
    }
}

/// Owner listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListOwnBlogsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub state: Option<String>,
}

impl From<ListOwnBlogsQuery> for ListOwnBlogsDto {
    fn from(q: ListOwnBlogsQuery) -> Self {
        Self {
            page: q.page,
            limit: q.limit,
            state: q.state,
        }
    }
}
