//! Post and group post data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserId};

/// Stable post identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i32);

impl PostId {
    /// Wrap a raw storage-assigned id.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable group post identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupPostId(i32);

impl GroupPostId {
    /// Wrap a raw storage-assigned id.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for GroupPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post authored by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a post; the author id is attached
/// server-side from the request envelope, never trusted from post data.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
}

/// A post authored collectively by multiple users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPost {
    pub id: GroupPostId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a group post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGroupPost {
    pub title: String,
    pub description: String,
}

/// A group post with its memberships resolved to full user records.
///
/// Membership order follows insertion order and duplicates are preserved:
/// supplying the same user id twice at creation yields two entries here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPostWithMembers {
    pub post: GroupPost,
    pub members: Vec<User>,
}
