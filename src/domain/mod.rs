//! Domain model, services, and ports.
//!
//! Everything here is transport and storage agnostic: the HTTP layer talks
//! to the driving ports, and the Diesel adapters implement the driven ones.

pub mod error;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod user;
pub mod user_service;

pub use error::{Error, ErrorCode};
pub use post::{GroupPost, GroupPostId, GroupPostWithMembers, NewGroupPost, NewPost, Post, PostId};
pub use post_service::PostService;
pub use user::{
    NewUser, SettingsChanges, User, UserChanges, UserId, UserProfile, UserSettings,
    UserValidationError, Username,
};
pub use user_service::UserService;
