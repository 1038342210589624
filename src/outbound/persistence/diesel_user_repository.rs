//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Relation loading follows the adapter convention used across this layer:
//! all SELECTs for one logical read run inside a single transaction so they
//! observe a consistent snapshot, and rows are assembled into domain types
//! in Rust afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{
    NewUser, SettingsChanges, User, UserChanges, UserId, UserProfile, UserSettings, Username,
};
use crate::domain::{Post, PostId};

use super::models::{
    NewUserRow, NewUserSettingsRow, PostRow, SettingsChangeset, UserChangeset, UserRow,
    UserSettingsRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, user_settings, users};

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to user repository port errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to user repository port errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            UserRepositoryError::query("foreign key constraint violated")
        }
        _ => UserRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain user.
///
/// Stored usernames were validated on the way in; a row that no longer
/// passes validation indicates store drift and is reported as a query error
/// rather than silently accepted.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let username = Username::new(row.username)
        .map_err(|err| UserRepositoryError::query(format!("stored username rejected: {err}")))?;
    Ok(User {
        id: UserId::new(row.id),
        username,
        display_name: row.display_name,
        created_at: row.created_at,
    })
}

fn row_to_settings(row: &UserSettingsRow) -> UserSettings {
    UserSettings {
        sms_enabled: row.sms_enabled,
        notifications_on: row.notifications_on,
    }
}

fn row_to_post(row: PostRow) -> Post {
    Post {
        id: PostId::new(row.id),
        author_id: UserId::new(row.user_id),
        title: row.title,
        description: row.description,
        created_at: row.created_at,
    }
}

fn assemble_profile(
    user_row: UserRow,
    settings: Option<UserSettings>,
    post_rows: Vec<PostRow>,
) -> Result<UserProfile, UserRepositoryError> {
    Ok(UserProfile {
        user: row_to_user(user_row)?,
        settings,
        posts: post_rows.into_iter().map(row_to_post).collect(),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (user_rows, settings_rows, post_rows) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let user_rows: Vec<UserRow> = users::table
                        .order(users::id.asc())
                        .select(UserRow::as_select())
                        .load(conn)
                        .await?;

                    let ids: Vec<i32> = user_rows.iter().map(|row| row.id).collect();

                    let settings_rows: Vec<UserSettingsRow> = user_settings::table
                        .filter(user_settings::user_id.eq_any(&ids))
                        .select(UserSettingsRow::as_select())
                        .load(conn)
                        .await?;

                    let post_rows: Vec<PostRow> = posts::table
                        .filter(posts::user_id.eq_any(&ids))
                        .order(posts::id.asc())
                        .select(PostRow::as_select())
                        .load(conn)
                        .await?;

                    Ok((user_rows, settings_rows, post_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut settings_by_user: HashMap<i32, UserSettings> = settings_rows
            .iter()
            .map(|row| (row.user_id, row_to_settings(row)))
            .collect();
        let mut posts_by_user: HashMap<i32, Vec<PostRow>> = HashMap::new();
        for row in post_rows {
            posts_by_user.entry(row.user_id).or_default().push(row);
        }

        user_rows
            .into_iter()
            .map(|user_row| {
                let settings = settings_by_user.remove(&user_row.id);
                let user_posts = posts_by_user.remove(&user_row.id).unwrap_or_default();
                assemble_profile(user_row, settings, user_posts)
            })
            .collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let loaded = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let user_row: Option<UserRow> = users::table
                        .filter(users::id.eq(id.get()))
                        .select(UserRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(user_row) = user_row else {
                        return Ok(None);
                    };

                    let settings_row: Option<UserSettingsRow> = user_settings::table
                        .filter(user_settings::user_id.eq(id.get()))
                        .select(UserSettingsRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;

                    let post_rows: Vec<PostRow> = posts::table
                        .filter(posts::user_id.eq(id.get()))
                        .order(posts::id.asc())
                        .select(PostRow::as_select())
                        .load(conn)
                        .await?;

                    Ok(Some((user_row, settings_row, post_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        loaded
            .map(|(user_row, settings_row, post_rows)| {
                let settings = settings_row.as_ref().map(row_to_settings);
                assemble_profile(user_row, settings, post_rows)
            })
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn create(&self, new_user: NewUser) -> Result<UserProfile, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let defaults = UserSettings::defaults_for_new_user();

        let (user_row, settings_row) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let new_row = NewUserRow {
                    username: new_user.username.as_ref(),
                    display_name: new_user.display_name.as_deref(),
                };
                async move {
                    let user_row: UserRow = diesel::insert_into(users::table)
                        .values(&new_row)
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let settings_row: UserSettingsRow =
                        diesel::insert_into(user_settings::table)
                            .values(&NewUserSettingsRow {
                                user_id: user_row.id,
                                sms_enabled: defaults.sms_enabled,
                                notifications_on: defaults.notifications_on,
                            })
                            .returning(UserSettingsRow::as_returning())
                            .get_result(conn)
                            .await?;

                    Ok((user_row, settings_row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        assemble_profile(user_row, Some(row_to_settings(&settings_row)), Vec::new())
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // An all-None changeset is a Diesel error; an empty partial update
        // degenerates to a read of the current record.
        if changes.is_empty() {
            let row: Option<UserRow> = users::table
                .filter(users::id.eq(id.get()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            return row.map(row_to_user).transpose();
        }

        let changeset = UserChangeset {
            username: changes.username.as_ref().map(Username::as_ref),
            display_name: changes.display_name.as_deref(),
        };

        let row: Option<UserRow> = diesel::update(users::table.filter(users::id.eq(id.get())))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::delete(users::table.filter(users::id.eq(id.get())))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update_settings(
        &self,
        id: UserId,
        changes: SettingsChanges,
    ) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if changes.is_empty() {
            let found: Option<i32> = user_settings::table
                .filter(user_settings::user_id.eq(id.get()))
                .select(user_settings::user_id)
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            return Ok(found.is_some());
        }

        let updated = diesel::update(
            user_settings::table.filter(user_settings::user_id.eq(id.get())),
        )
        .set(&SettingsChangeset {
            sms_enabled: changes.sms_enabled,
            notifications_on: changes.notifications_on,
        })
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}
