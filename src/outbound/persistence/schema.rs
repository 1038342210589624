//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts.
    users (id) {
        id -> Int4,
        /// Unique handle (max 32 characters).
        username -> Varchar,
        display_name -> Nullable<Varchar>,
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user preference flags, one row per user.
    user_settings (id) {
        id -> Int4,
        user_id -> Int4,
        sms_enabled -> Bool,
        notifications_on -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-author posts.
    posts (id) {
        id -> Int4,
        user_id -> Int4,
        title -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Collectively authored posts.
    group_posts (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join rows linking group posts to their authors. Duplicates allowed.
    group_post_members (id) {
        id -> Int4,
        group_post_id -> Int4,
        user_id -> Int4,
    }
}

diesel::joinable!(user_settings -> users (user_id));
diesel::joinable!(posts -> users (user_id));
diesel::joinable!(group_post_members -> group_posts (group_post_id));
diesel::joinable!(group_post_members -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    user_settings,
    posts,
    group_posts,
    group_post_members,
);
