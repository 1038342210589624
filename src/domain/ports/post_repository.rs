//! Driven port for post persistence.

use async_trait::async_trait;

use crate::domain::post::{GroupPost, GroupPostWithMembers, NewGroupPost, NewPost, Post};
use crate::domain::user::UserId;

/// Errors raised by post repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostRepositoryError {
    /// Repository connection could not be established.
    #[error("post repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("post repository query failed: {message}")]
    Query { message: String },
}

impl PostRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for post and group post storage.
///
/// Referential integrity is delegated to storage: creating a post for an
/// unknown author fails at the foreign key, surfacing as a `Query` error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post for the given author.
    async fn create_post(
        &self,
        author: UserId,
        new_post: NewPost,
    ) -> Result<Post, PostRepositoryError>;

    /// Insert a group post plus one membership row per supplied id, in one
    /// transaction. Duplicate ids produce duplicate membership rows.
    async fn create_group_post(
        &self,
        authors: Vec<UserId>,
        new_post: NewGroupPost,
    ) -> Result<GroupPost, PostRepositoryError>;

    /// Fetch all group posts with memberships resolved to user records.
    async fn list_group_posts(&self) -> Result<Vec<GroupPostWithMembers>, PostRepositoryError>;
}
