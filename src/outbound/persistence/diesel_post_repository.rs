//! PostgreSQL-backed `PostRepository` implementation using Diesel.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::post::{
    GroupPost, GroupPostId, GroupPostWithMembers, NewGroupPost, NewPost, Post, PostId,
};
use crate::domain::user::{User, UserId, Username};

use super::models::{
    GroupPostMemberRow, GroupPostRow, NewGroupPostMemberRow, NewGroupPostRow, NewPostRow, PostRow,
    UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{group_post_members, group_posts, posts, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to post repository port errors.
fn map_pool_error(error: PoolError) -> PostRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PostRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to post repository port errors.
fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
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
            PostRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            PostRepositoryError::query("foreign key constraint violated")
        }
        _ => PostRepositoryError::query("database error"),
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

fn row_to_group_post(row: GroupPostRow) -> GroupPost {
    GroupPost {
        id: GroupPostId::new(row.id),
        title: row.title,
        description: row.description,
        created_at: row.created_at,
    }
}

fn row_to_member(row: UserRow) -> Result<User, PostRepositoryError> {
    let username = Username::new(row.username)
        .map_err(|err| PostRepositoryError::query(format!("stored username rejected: {err}")))?;
    Ok(User {
        id: UserId::new(row.id),
        username,
        display_name: row.display_name,
        created_at: row.created_at,
    })
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create_post(
        &self,
        author: UserId,
        new_post: NewPost,
    ) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&NewPostRow {
                user_id: author.get(),
                title: &new_post.title,
                description: &new_post.description,
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_post(row))
    }

    async fn create_group_post(
        &self,
        authors: Vec<UserId>,
        new_post: NewGroupPost,
    ) -> Result<GroupPost, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let new_row = NewGroupPostRow {
                    title: &new_post.title,
                    description: &new_post.description,
                };
                async move {
                    let group_row: GroupPostRow = diesel::insert_into(group_posts::table)
                        .values(&new_row)
                        .returning(GroupPostRow::as_returning())
                        .get_result(conn)
                        .await?;

                    // One membership row per supplied id; duplicates kept.
                    let member_rows: Vec<NewGroupPostMemberRow> = authors
                        .into_iter()
                        .map(|author| NewGroupPostMemberRow {
                            group_post_id: group_row.id,
                            user_id: author.get(),
                        })
                        .collect();

                    if !member_rows.is_empty() {
                        diesel::insert_into(group_post_members::table)
                            .values(&member_rows)
                            .execute(conn)
                            .await?;
                    }

                    Ok(group_row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_group_post(row))
    }

    async fn list_group_posts(&self) -> Result<Vec<GroupPostWithMembers>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (group_rows, member_rows) = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let group_rows: Vec<GroupPostRow> = group_posts::table
                        .order(group_posts::id.asc())
                        .select(GroupPostRow::as_select())
                        .load(conn)
                        .await?;

                    let member_rows: Vec<(GroupPostMemberRow, UserRow)> =
                        group_post_members::table
                            .inner_join(users::table)
                            .order(group_post_members::id.asc())
                            .select((
                                GroupPostMemberRow::as_select(),
                                UserRow::as_select(),
                            ))
                            .load(conn)
                            .await?;

                    Ok((group_rows, member_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let mut members_by_group: HashMap<i32, Vec<User>> = HashMap::new();
        for (member_row, user_row) in member_rows {
            members_by_group
                .entry(member_row.group_post_id)
                .or_default()
                .push(row_to_member(user_row)?);
        }

        Ok(group_rows
            .into_iter()
            .map(|group_row| {
                let members = members_by_group.remove(&group_row.id).unwrap_or_default();
                GroupPostWithMembers {
                    post: row_to_group_post(group_row),
                    members,
                }
            })
            .collect())
    }
}
