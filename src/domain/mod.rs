//! # Domain Layer
//!
//! The domain layer contains the core business logic of the blogging
//! platform. It is independent of any external frameworks or infrastructure
//! concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Blog) and repository traits
//! - **value_objects**: Immutable value types (BlogState, BlogQuery, Page)
//! - **services**: Visibility policy, query building, validation
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Requester identity is always an explicit parameter
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
