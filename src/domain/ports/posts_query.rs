//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::post::GroupPostWithMembers;

/// Read-side operations the HTTP layer invokes for posts.
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All group posts with memberships resolved to full user records.
    async fn list_group_posts(&self) -> Result<Vec<GroupPostWithMembers>, Error>;
}
