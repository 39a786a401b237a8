//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;
use super::validation::{ValidationError, normalize_username};

/// Server-assigned user identifier.
///
/// On the wire an identifier may arrive as a plain string or as a MongoDB
/// extended-JSON object (`{"$oid": "..."}`). Both decode to the same
/// canonical string; requests always encode it as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireId", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] when the input is empty or
    /// contains only whitespace.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, ValidationError> {
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Identifier shapes accepted from the server.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Plain(String),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl TryFrom<WireId> for UserId {
    type Error = ValidationError;

    fn try_from(value: WireId) -> Result<Self, Self::Error> {
        match value {
            WireId::Plain(id) | WireId::ObjectId { oid: id } => Self::from_owned(id),
        }
    }
}

/// Username accepted for account creation.
///
/// Surrounding whitespace is trimmed; the remainder must be between
/// [`USERNAME_MIN`](super::validation::USERNAME_MIN) and
/// [`USERNAME_MAX`](super::validation::USERNAME_MAX) characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// # Errors
    ///
    /// Returns an `InvalidArgument` [`ValidationError`] when the trimmed
    /// input is empty, too short or too long.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        normalize_username(raw).map(Self)
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

/// Tracked user as reported by the server.
///
/// ## Invariants
/// - `id` is non-empty.
/// - `username` is non-empty once trimmed of whitespace.
///
/// Users are never mutated client-side; status changes come back from the
/// server as a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    username: String,
    created_at: Timestamp,
    is_active: bool,
}

impl User {
    /// Fallible constructor enforcing identifier and username invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] or
    /// [`ValidationError::EmptyUsername`] when either field is blank.
    ///
    /// # Examples
    /// ```
    /// use location_tracker::User;
    ///
    /// let user = User::new("507f1f77bcf86cd799439011", "alice", "2024-01-25T10:00:00.000Z", true)?;
    /// assert!(user.is_active());
    /// # Ok::<(), location_tracker::ValidationError>(())
    /// ```
    pub fn new(
        id: impl AsRef<str>,
        username: impl Into<String>,
        created_at: impl Into<Timestamp>,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        let user_id = UserId::new(id)?;
        let name: String = username.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        Ok(Self {
            id: user_id,
            username: name,
            created_at: created_at.into(),
            is_active,
        })
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Username as stored by the server.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Creation timestamp as reported by the server.
    #[must_use]
    pub const fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Whether the user is currently flagged active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    #[serde(alias = "_id")]
    id: UserId,
    username: String,
    #[serde(default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    is_active: Option<bool>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            username,
            created_at,
            is_active,
        } = value;
        Self {
            id,
            username,
            created_at: Some(created_at),
            is_active: Some(is_active),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = ValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        if value.username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        Ok(Self {
            id: value.id,
            username: value.username,
            created_at: value.created_at.unwrap_or_default(),
            is_active: value.is_active.unwrap_or(false),
        })
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
