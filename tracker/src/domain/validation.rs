//! Field-level validation shared by entities and request DTOs.
//!
//! Every constructor in the domain funnels through these checks, so the same
//! rules hold whether a value came from the caller or from a decoded response.

use thiserror::Error;

/// Minimum username length, counted in characters after trimming.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length, counted in characters after trimming.
pub const USERNAME_MAX: usize = 50;

/// Inclusive latitude bounds in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Inclusive longitude bounds in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Broad category of a validation failure.
///
/// Caller input that is simply wrong is an `InvalidArgument`; identifiers
/// are expected to exist server-side already, so a missing one is an
/// `InvalidState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// A caller-supplied value is out of range or malformed.
    InvalidArgument,
    /// A value that should already exist is missing.
    InvalidState,
}

/// Synchronous validation failures raised by domain constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// User identifier was empty or whitespace.
    #[error("user id must not be empty")]
    EmptyUserId,
    /// Username was empty or whitespace.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username shorter than [`USERNAME_MIN`] once trimmed.
    #[error("username must be at least {min} characters")]
    UsernameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// Username longer than [`USERNAME_MAX`] once trimmed.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Latitude outside [`LATITUDE_RANGE`].
    #[error("latitude must be within [-90, 90], got {latitude}")]
    LatitudeOutOfRange {
        /// Rejected value.
        latitude: f64,
    },
    /// Longitude outside [`LONGITUDE_RANGE`].
    #[error("longitude must be within [-180, 180], got {longitude}")]
    LongitudeOutOfRange {
        /// Rejected value.
        longitude: f64,
    },
}

impl ValidationError {
    /// Category used by callers to tell bad input from missing state.
    ///
    /// # Examples
    /// ```
    /// use location_tracker::{ValidationError, ValidationKind};
    ///
    /// assert_eq!(ValidationError::EmptyUserId.kind(), ValidationKind::InvalidState);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ValidationKind {
        match self {
            Self::EmptyUserId => ValidationKind::InvalidState,
            Self::EmptyUsername
            | Self::UsernameTooShort { .. }
            | Self::UsernameTooLong { .. }
            | Self::LatitudeOutOfRange { .. }
            | Self::LongitudeOutOfRange { .. } => ValidationKind::InvalidArgument,
        }
    }
}

/// Trim a username and enforce its length bounds.
pub(crate) fn normalize_username(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }

    let length = trimmed.chars().count();
    if length < USERNAME_MIN {
        return Err(ValidationError::UsernameTooShort { min: USERNAME_MIN });
    }
    if length > USERNAME_MAX {
        return Err(ValidationError::UsernameTooLong { max: USERNAME_MAX });
    }
    Ok(trimmed.to_owned())
}

/// NaN never satisfies a range check, so it is rejected here too.
pub(crate) fn validate_latitude(latitude: f64) -> Result<f64, ValidationError> {
    if LATITUDE_RANGE.contains(&latitude) {
        Ok(latitude)
    } else {
        Err(ValidationError::LatitudeOutOfRange { latitude })
    }
}

pub(crate) fn validate_longitude(longitude: f64) -> Result<f64, ValidationError> {
    if LONGITUDE_RANGE.contains(&longitude) {
        Ok(longitude)
    } else {
        Err(ValidationError::LongitudeOutOfRange { longitude })
    }
}

#[cfg(test)]
mod tests {
    //! Boundary coverage for the shared validators.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::minimum("abc", "abc")]
    #[case::trimmed("  alice  ", "alice")]
    #[case::maximum(&"a".repeat(USERNAME_MAX), &"a".repeat(USERNAME_MAX))]
    #[case::multibyte("åäö", "åäö")]
    fn accepts_usernames_within_bounds(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_username(raw), Ok(expected.to_owned()));
    }

    #[rstest]
    #[case::empty("", ValidationError::EmptyUsername)]
    #[case::whitespace("   \t", ValidationError::EmptyUsername)]
    #[case::too_short("ab", ValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case::short_after_trim("  ab  ", ValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case::too_long(&"a".repeat(USERNAME_MAX + 1), ValidationError::UsernameTooLong { max: USERNAME_MAX })]
    fn rejects_usernames_outside_bounds(#[case] raw: &str, #[case] expected: ValidationError) {
        let error = normalize_username(raw).expect_err("username should be rejected");
        assert_eq!(error, expected);
        assert_eq!(error.kind(), ValidationKind::InvalidArgument);
    }

    #[rstest]
    #[case(-90.0)]
    #[case(0.0)]
    #[case(90.0)]
    fn accepts_latitude_bounds(#[case] latitude: f64) {
        assert_eq!(validate_latitude(latitude), Ok(latitude));
    }

    #[rstest]
    #[case(-90.000_001)]
    #[case(91.0)]
    #[case(f64::INFINITY)]
    fn rejects_latitude_out_of_range(#[case] latitude: f64) {
        let error = validate_latitude(latitude).expect_err("latitude should be rejected");
        assert!(matches!(error, ValidationError::LatitudeOutOfRange { .. }));
        assert_eq!(error.kind(), ValidationKind::InvalidArgument);
    }

    #[test]
    fn rejects_nan_coordinates() {
        assert!(validate_latitude(f64::NAN).is_err());
        assert!(validate_longitude(f64::NAN).is_err());
    }

    #[rstest]
    #[case(-180.0)]
    #[case(180.0)]
    fn accepts_longitude_bounds(#[case] longitude: f64) {
        assert_eq!(validate_longitude(longitude), Ok(longitude));
    }

    #[rstest]
    #[case(-180.5)]
    #[case(181.0)]
    fn rejects_longitude_out_of_range(#[case] longitude: f64) {
        let error = validate_longitude(longitude).expect_err("longitude should be rejected");
        assert_eq!(error, ValidationError::LongitudeOutOfRange { longitude });
    }

    #[test]
    fn empty_user_id_is_invalid_state() {
        assert_eq!(ValidationError::EmptyUserId.kind(), ValidationKind::InvalidState);
        assert_eq!(ValidationError::EmptyUserId.to_string(), "user id must not be empty");
    }
}
