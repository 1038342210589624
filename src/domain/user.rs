//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::post::Post;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, or underscores",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw storage-assigned id.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z0-9_]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique handle identifying a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from owned input.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }

        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }

        if !username_regex().is_match(&username) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `username` is unique across all users (enforced by storage).
/// - Every persisted user owns exactly one [`UserSettings`] record, created
///   in the same transaction as the user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-user preference flags, created alongside the owning user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub sms_enabled: bool,
    pub notifications_on: bool,
}

impl UserSettings {
    /// Defaults applied when a user is created.
    pub fn defaults_for_new_user() -> Self {
        Self {
            sms_enabled: true,
            notifications_on: false,
        }
    }
}

/// A user with its settings and authored posts attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
    /// Absent only if storage has drifted from the creation invariant.
    pub settings: Option<UserSettings>,
    pub posts: Vec<Post>,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub display_name: Option<String>,
}

/// Partial update to a user record; `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserChanges {
    pub username: Option<Username>,
    pub display_name: Option<String>,
}

impl UserChanges {
    /// True when the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.display_name.is_none()
    }
}

/// Partial update to a settings record; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsChanges {
    pub sms_enabled: Option<bool>,
    pub notifications_on: Option<bool>,
}

impl SettingsChanges {
    /// True when the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.sms_enabled.is_none() && self.notifications_on.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada")]
    #[case("ada_lovelace")]
    #[case("User42")]
    fn username_accepts_valid_handles(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("ab", UserValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case("ada lovelace", UserValidationError::UsernameInvalidCharacters)]
    #[case("ada!", UserValidationError::UsernameInvalidCharacters)]
    fn username_rejects_invalid_handles(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
    }

    #[test]
    fn username_rejects_overlong_handles() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).expect_err("overlong username"),
            UserValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[test]
    fn new_user_settings_default_to_sms_on_notifications_off() {
        let defaults = UserSettings::defaults_for_new_user();
        assert!(defaults.sms_enabled);
        assert!(!defaults.notifications_on);
    }

    #[rstest]
    fn empty_changes_are_detected() {
        assert!(UserChanges::default().is_empty());
        assert!(SettingsChanges::default().is_empty());
        assert!(
            !UserChanges {
                display_name: Some("Ada".into()),
                ..UserChanges::default()
            }
            .is_empty()
        );
        assert!(
            !SettingsChanges {
                sms_enabled: Some(false),
                ..SettingsChanges::default()
            }
            .is_empty()
        );
    }
}
