//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity. They are pure: no I/O, no mutation of stored state.
//!
//! ## Services
//!
//! - **AccessPolicy**: who may view and who may change a blog
//! - **BlogQueryBuilder**: listing parameters to storage-agnostic queries
//! - **blog_validation**: field checks run before every blog mutation
//! - **reading_time**: word count based reading time estimate

mod access_policy;
pub mod blog_validation;
mod query_builder;
pub mod reading_time;

pub use access_policy::*;
pub use query_builder::*;
