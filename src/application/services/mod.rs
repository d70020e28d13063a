//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **CredentialService**: Password hashing and bearer tokens
//! - **AuthService**: Signup, signin and token validation
//! - **BlogService**: Blog lifecycle, views and listings

pub mod auth_service;
pub mod blog_service;
pub mod credential_service;

// Re-export credential types
pub use credential_service::{AccessToken, Claims, CredentialError, CredentialService};

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, SignupDto};

// Re-export blog service types
pub use blog_service::{
    AuthorSummary, BlogError, BlogService, BlogServiceImpl, BlogView, CreateBlogDto,
    ListBlogsDto, ListOwnBlogsDto,
};
