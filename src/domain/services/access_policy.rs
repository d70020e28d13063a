//! Blog visibility and ownership rules.

use crate::domain::entities::Blog;

/// Decides who may see and who may change a blog.
///
/// Pure functions of the requester identity and an entity snapshot. Callers
/// turn a denial into `Forbidden`; a missing identity on a route that needs
/// one is rejected earlier as unauthenticated.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Published blogs are visible to everyone, drafts only to their author.
    pub fn can_view(requester: Option<i64>, blog: &Blog) -> bool {
        blog.is_published() || requester == Some(blog.author_id)
    }

    /// Update, state change and delete are reserved to the author.
    pub fn can_mutate(requester: i64, blog: &Blog) -> bool {
        requester == blog.author_id
    }
}
