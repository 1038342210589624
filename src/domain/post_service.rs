//! Post domain service.
//!
//! Thin pass-through from the post driving ports to the repository: post
//! operations carry no business rules beyond what storage enforces.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{PostRepository, PostRepositoryError, PostsCommand, PostsQuery};
use crate::domain::post::{GroupPost, GroupPostWithMembers, NewGroupPost, NewPost, Post};
use crate::domain::user::UserId;

/// Post service implementing the driving ports.
#[derive(Clone)]
pub struct PostService<R> {
    repo: Arc<R>,
}

impl<R> PostService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> PostService<R>
where
    R: PostRepository,
{
    fn map_repo_error(error: PostRepositoryError) -> Error {
        match error {
            PostRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("post repository unavailable: {message}"))
            }
            PostRepositoryError::Query { message } => {
                Error::internal(format!("post repository error: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R> PostsCommand for PostService<R>
where
    R: PostRepository,
{
    async fn create_post(&self, author: UserId, new_post: NewPost) -> Result<Post, Error> {
        self.repo
            .create_post(author, new_post)
            .await
            .map_err(Self::map_repo_error)
    }

    async fn create_group_post(
        &self,
        authors: Vec<UserId>,
        new_post: NewGroupPost,
    ) -> Result<GroupPost, Error> {
        self.repo
            .create_group_post(authors, new_post)
            .await
            .map_err(Self::map_repo_error)
    }
}

#[async_trait]
impl<R> PostsQuery for PostService<R>
where
    R: PostRepository,
{
    async fn list_group_posts(&self) -> Result<Vec<GroupPostWithMembers>, Error> {
        self.repo
            .list_group_posts()
            .await
            .map_err(Self::map_repo_error)
    }
}
