//! Blog visibility state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visibility state of a blog.
///
/// A blog is created as a draft and becomes visible to everyone once
/// published. Unpublishing returns it to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlogState {
    #[default]
    Draft,
    Published,
}

/// Raised for a state string outside `{draft, published}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid blog state '{0}', expected 'draft' or 'published'")]
pub struct InvalidBlogState(pub String);

impl BlogState {
    /// Database / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl FromStr for BlogState {
    type Err = InvalidBlogState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            other => Err(InvalidBlogState(other.to_string())),
        }
    }
}

impl std::fmt::Display for BlogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
