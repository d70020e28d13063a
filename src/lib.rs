//! # Blog API Library
//!
//! A blogging platform REST API:
//! - Signup / signin with bearer tokens
//! - Draft and published blogs with owner-only mutation
//! - Filtered, sorted and paginated listings
//! - PostgreSQL or in-memory storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities, value objects, policies and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, repositories and metrics
//! - **Presentation Layer**: HTTP routes, handlers and extractors
//!
//! ## Module Structure
//!
//! ```text
//! blog_api/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, policies and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Repositories, database and metrics
//! +-- presentation/   HTTP routes, extractors and middleware
//! +-- shared/         Common utilities (errors, snowflake IDs, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
