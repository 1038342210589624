//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Row structs select only the columns the
//! adapters read, so audit columns the API does not surface stay out.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{group_post_members, group_posts, posts, user_settings, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub display_name: Option<&'a str>,
}

/// Changeset struct for partial user updates; `None` fields are skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub username: Option<&'a str>,
    pub display_name: Option<&'a str>,
}

/// Row struct for reading from the user_settings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserSettingsRow {
    pub user_id: i32,
    pub sms_enabled: bool,
    pub notifications_on: bool,
}

/// Insertable struct for creating a user's settings row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_settings)]
pub(crate) struct NewUserSettingsRow {
    pub user_id: i32,
    pub sms_enabled: bool,
    pub notifications_on: bool,
}

/// Changeset struct for partial settings updates; `None` fields are skipped.
#[derive(Debug, Clone, Copy, AsChangeset)]
#[diesel(table_name = user_settings)]
pub(crate) struct SettingsChangeset {
    pub sms_enabled: Option<bool>,
    pub notifications_on: Option<bool>,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub user_id: i32,
    pub title: &'a str,
    pub description: &'a str,
}

/// Row struct for reading from the group_posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = group_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupPostRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new group post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = group_posts)]
pub(crate) struct NewGroupPostRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Row struct for reading membership join rows.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = group_post_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GroupPostMemberRow {
    pub group_post_id: i32,
    pub user_id: i32,
}

/// Insertable struct for creating membership join rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = group_post_members)]
pub(crate) struct NewGroupPostMemberRow {
    pub group_post_id: i32,
    pub user_id: i32,
}
