//! Validation rules applied before any blog mutation.
//!
//! Every check runs and all failures are reported together as field errors.

use crate::domain::entities::BlogPatch;
use crate::shared::error::FieldError;

/// Fields that can never be set through a regular update.
pub const PROTECTED_FIELDS: [&str; 3] = ["author", "read_count", "state"];

/// Check the fields required to create a blog.
pub fn validate_new_blog(title: &str, body: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    check_title(title, &mut errors);
    check_body(body, &mut errors);
    into_result(errors)
}

/// Check an update patch.
pub fn validate_patch(patch: &BlogPatch) -> Result<(), Vec<FieldError>> {
    let mut errors: Vec<FieldError> = patch
        .protected_fields
        .iter()
        .map(|field| FieldError::new(field.as_str(), format!("{field} cannot be changed through update")))
        .collect();

    if let Some(title) = &patch.title {
        check_title(title, &mut errors);
    }
    if let Some(body) = &patch.body {
        check_body(body, &mut errors);
    }
    into_result(errors)
}

/// Trim tags, drop empty ones and remove duplicates, keeping first occurrences.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// An empty or whitespace-only description is stored as absent.
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) {
    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }
}

fn check_body(body: &str, errors: &mut Vec<FieldError>) {
    if body.trim().is_empty() {
        errors.push(FieldError::new("body", "Body is required"));
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
