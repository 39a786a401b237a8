//! Validated request bodies sent to the tracking service.
//!
//! Each DTO is built from raw caller input before any exchange starts, so a
//! value of one of these types is always safe to put on the wire.

use serde::Serialize;

use super::location::Coordinates;
use super::user::{UserId, Username};
use super::validation::ValidationError;

/// Body of `POST /api/users/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    username: Username,
}

impl CreateUserRequest {
    /// Validate a username; surrounding whitespace is trimmed away.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` [`ValidationError`] when the trimmed
    /// username is empty or outside the accepted length range.
    pub fn new(username: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
        })
    }

    /// Normalised username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

/// Body of `POST /api/users/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyUserRequest {
    user_id: UserId,
}

impl VerifyUserRequest {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier.
    pub fn new(user_id: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
        })
    }

    /// Identifier to verify.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

/// Body of `PATCH /api/users/{userId}/status`.
///
/// The identifier travels in the path, so only `is_active` is serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdateRequest {
    #[serde(skip)]
    user_id: UserId,
    is_active: bool,
}

impl StatusUpdateRequest {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier.
    pub fn new(user_id: &str, is_active: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            is_active,
        })
    }

    /// Identifier of the user being updated.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Requested active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Body of `POST /api/locations/update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationUpdateRequest {
    user_id: UserId,
    latitude: f64,
    longitude: f64,
}

impl LocationUpdateRequest {
    /// Validate the identifier and both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUserId`] for a blank identifier, or a
    /// range error for either coordinate.
    pub fn new(user_id: &str, latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let owner = UserId::new(user_id)?;
        let coordinates = Coordinates::new(latitude, longitude)?;
        Ok(Self {
            user_id: owner,
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
        })
    }

    /// Identifier of the user whose location is reported.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Reported coordinates.
    #[must_use]
    pub const fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
