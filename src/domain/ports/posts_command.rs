//! Driving port for post mutations.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::post::{GroupPost, NewGroupPost, NewPost, Post};
use crate::domain::user::UserId;

/// Write-side operations the HTTP layer invokes for posts.
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a single-author post. The author id is not verified here;
    /// storage-level referential integrity rejects orphan references.
    async fn create_post(&self, author: UserId, new_post: NewPost) -> Result<Post, Error>;

    /// Create a group post with one membership per supplied id, atomically.
    async fn create_group_post(
        &self,
        authors: Vec<UserId>,
        new_post: NewGroupPost,
    ) -> Result<GroupPost, Error>;
}
