//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{NewUser, SettingsChanges, User, UserChanges, UserId, UserProfile};

/// Write-side operations the HTTP layer invokes for users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user together with its default settings record.
    async fn create_user(&self, new_user: NewUser) -> Result<UserProfile, Error>;

    /// Apply a partial update to a user.
    ///
    /// Fails with `NotFound` when the id is absent and with `Conflict` when
    /// the update renames the user to a username held by a different user.
    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;

    /// Delete a user by id, returning the record's prior state.
    ///
    /// Fails with `NotFound` when the id is absent.
    async fn delete_user(&self, id: UserId) -> Result<User, Error>;

    /// Apply a partial update to a user's settings.
    ///
    /// Fails with `NotFound` when the user is absent and with
    /// `InvalidRequest` when the user exists without a settings row.
    async fn update_user_settings(
        &self,
        id: UserId,
        changes: SettingsChanges,
    ) -> Result<(), Error>;
}
