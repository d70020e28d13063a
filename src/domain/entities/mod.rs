//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! blogging platform. All entities map directly to their database tables.
//!
//! - **User**: account with credentials and display name parts
//! - **Blog**: a post with visibility state and derived counters
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod blog;
mod user;

pub use blog::{Blog, BlogPatch, BlogRepository};
pub use user::{normalize_email, User, UserRepository};

#[cfg(test)]
pub use blog::MockBlogRepository;
#[cfg(test)]
pub use user::MockUserRepository;
