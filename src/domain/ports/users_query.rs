//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{UserId, UserProfile};

/// Read-side operations the HTTP layer invokes for users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users with settings and posts. No pagination or filtering.
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;

    /// One user by id with settings and posts.
    ///
    /// A missing id is an absent result, not an error: the HTTP layer
    /// serialises `None` as a JSON `null` body with a 200 status.
    async fn get_user(&self, id: UserId) -> Result<Option<UserProfile>, Error>;
}
