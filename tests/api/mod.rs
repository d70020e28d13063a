//! REST API endpoint tests

mod auth_tests;
mod blog_tests;
mod health_tests;
mod listing_tests;
