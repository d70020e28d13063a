//! Presentation Layer
//!
//! HTTP routes, handlers, extractors and middleware.

pub mod http;
pub mod middleware;
