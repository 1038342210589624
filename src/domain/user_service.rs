//! User lifecycle domain service.
//!
//! Implements the user driving ports over a [`UserRepository`]. All business
//! rules live here: default settings at creation, existence checks before
//! mutation, and the username-uniqueness check on rename.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::user::{NewUser, SettingsChanges, User, UserChanges, UserId, UserProfile};

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_repo_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn user_not_found(id: UserId) -> Error {
        Error::not_found("user not found").with_details(json!({ "id": id.get() }))
    }

    fn username_taken(username: &str) -> Error {
        Error::conflict("username already taken").with_details(json!({
            "field": "username",
            "value": username,
        }))
    }

    /// Reject a rename to a username held by a different user.
    ///
    /// The record being updated is excluded, so renaming to one's own
    /// current username is a no-op success rather than a conflict.
    async fn ensure_username_free(&self, id: UserId, username: &str) -> Result<(), Error> {
        let holder = self
            .repo
            .find_by_username(username)
            .await
            .map_err(Self::map_repo_error)?;

        match holder {
            Some(existing) if existing.id != id => Err(Self::username_taken(username)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        self.repo.list().await.map_err(Self::map_repo_error)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<UserProfile>, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repo_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, new_user: NewUser) -> Result<UserProfile, Error> {
        // No uniqueness pre-check: a duplicate username trips the storage
        // unique constraint and surfaces as an internal error.
        self.repo
            .create(new_user)
            .await
            .map_err(Self::map_repo_error)
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        let existing = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repo_error)?;
        if existing.is_none() {
            return Err(Self::user_not_found(id));
        }

        if let Some(username) = &changes.username {
            self.ensure_username_free(id, username.as_ref()).await?;
        }

        self.repo
            .update(id, changes)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(|| Self::user_not_found(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<User, Error> {
        self.repo
            .delete(id)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(|| Self::user_not_found(id))
    }

    async fn update_user_settings(
        &self,
        id: UserId,
        changes: SettingsChanges,
    ) -> Result<(), Error> {
        let profile = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_repo_error)?
            .ok_or_else(|| Self::user_not_found(id))?;

        // Defensive: the creation invariant makes a settings row mandatory,
        // but a drifted store must not panic the service.
        if profile.settings.is_none() {
            return Err(Error::invalid_request("user has no settings record"));
        }

        let updated = self
            .repo
            .update_settings(id, changes)
            .await
            .map_err(Self::map_repo_error)?;
        if !updated {
            return Err(Error::invalid_request("user has no settings record"));
        }
        Ok(())
    }
}
