//! Driven port for user persistence.
//!
//! Adapters implement this trait to provide durable storage for users and
//! their settings. Multi-step writes (user plus default settings) must be
//! atomic: a caller never observes a user without its settings row.

use async_trait::async_trait;

use crate::domain::user::{NewUser, SettingsChanges, User, UserChanges, UserId, UserProfile};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
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

/// Port for user storage and retrieval.
///
/// Read operations that include relations return [`UserProfile`]; mutations
/// on the user record alone return the bare [`User`]. Absent rows are
/// reported as `Ok(None)` (or `Ok(false)` for the settings update), never as
/// errors — the service layer decides what absence means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch all users with their settings and posts attached.
    async fn list(&self) -> Result<Vec<UserProfile>, UserRepositoryError>;

    /// Fetch one user by id with settings and posts attached.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, UserRepositoryError>;

    /// Fetch the bare user record holding the given username, if any.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserRepositoryError>;

    /// Insert a user and its default settings in one transaction.
    async fn create(&self, new_user: NewUser) -> Result<UserProfile, UserRepositoryError>;

    /// Apply a partial update and return the updated record, or `None` if
    /// the id no longer exists.
    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Delete by id and return the record's prior state, or `None` if the id
    /// does not exist. Storage cascades to settings, posts, and memberships.
    async fn delete(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Apply a partial update to the user's settings row.
    ///
    /// Returns `false` when no settings row exists for the user. An empty
    /// changeset degenerates to an existence probe.
    async fn update_settings(
        &self,
        id: UserId,
        changes: SettingsChanges,
    ) -> Result<bool, UserRepositoryError>;
}
