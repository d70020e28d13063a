//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! ## Value Objects
//!
//! - **BlogState**: draft / published visibility
//! - **BlogQuery**: storage-agnostic predicate, sort key and page window
//! - **Page**: one page of results with paging metadata

mod blog_query;
mod blog_state;

pub use blog_query::*;
pub use blog_state::*;
