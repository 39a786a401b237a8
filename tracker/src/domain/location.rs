//! Geographic location value objects.

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;
use super::user::UserId;
use super::validation::{ValidationError, validate_latitude, validate_longitude};

/// WGS84 coordinate pair validated against latitude and longitude ranges.
///
/// # Examples
/// ```
/// use location_tracker::domain::Coordinates;
///
/// let point = Coordinates::new(32.109333, 34.855499)?;
/// assert_eq!(point.latitude(), 32.109333);
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// # Ok::<(), location_tracker::ValidationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate both axes. Latitude is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LatitudeOutOfRange`] or
    /// [`ValidationError::LongitudeOutOfRange`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}

/// Last known location of a user.
///
/// ## Invariants
/// - `user_id` is non-empty.
/// - coordinates lie within WGS84 ranges.
///
/// `last_updated` is opaque and never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationDto", into = "LocationDto")]
pub struct Location {
    user_id: UserId,
    coordinates: Coordinates,
    last_updated: Timestamp,
}

impl Location {
    /// Fallible constructor validating every field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an empty user id or out-of-range
    /// coordinates.
    ///
    /// # Examples
    /// ```
    /// use location_tracker::Location;
    ///
    /// let location = Location::new("u1", 32.109333, 34.855499, "2024-01-20")?;
    /// assert_eq!(location.user_id().as_ref(), "u1");
    /// assert_eq!(location.last_updated().as_ref(), "2024-01-20");
    /// # Ok::<(), location_tracker::ValidationError>(())
    /// ```
    pub fn new(
        user_id: impl AsRef<str>,
        latitude: f64,
        longitude: f64,
        last_updated: impl Into<Timestamp>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            coordinates: Coordinates::new(latitude, longitude)?,
            last_updated: last_updated.into(),
        })
    }

    /// Owner of this location.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Validated coordinate pair.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }

    /// Timestamp of the most recent update.
    #[must_use]
    pub const fn last_updated(&self) -> &Timestamp {
        &self.last_updated
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocationDto {
    user_id: UserId,
    latitude: f64,
    longitude: f64,
    last_updated: Timestamp,
}

impl From<Location> for LocationDto {
    fn from(value: Location) -> Self {
        Self {
            user_id: value.user_id,
            latitude: value.coordinates.latitude,
            longitude: value.coordinates.longitude,
            last_updated: value.last_updated,
        }
    }
}

impl TryFrom<LocationDto> for Location {
    type Error = ValidationError;

    fn try_from(value: LocationDto) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: value.user_id,
            coordinates: Coordinates::new(value.latitude, value.longitude)?,
            last_updated: value.last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Construction and decoding coverage for locations.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn reads_back_constructed_fields_unchanged() {
        let location =
            Location::new("u1", 32.109333, 34.855499, "2024-01-20").expect("valid location");

        assert_eq!(location.user_id().as_ref(), "u1");
        assert_eq!(location.latitude(), 32.109333);
        assert_eq!(location.longitude(), 34.855499);
        assert_eq!(location.last_updated().as_ref(), "2024-01-20");
    }

    #[test]
    fn accepts_origin() {
        let location = Location::new("123", 0.0, 0.0, "2024-01-20").expect("origin is valid");
        assert_eq!(location.coordinates(), Coordinates::new(0.0, 0.0).expect("origin"));
    }

    #[rstest]
    #[case::empty_user("", 0.0, 0.0, ValidationError::EmptyUserId)]
    #[case::latitude("u1", 91.0, 0.0, ValidationError::LatitudeOutOfRange { latitude: 91.0 })]
    #[case::longitude("u1", 0.0, -181.0, ValidationError::LongitudeOutOfRange { longitude: -181.0 })]
    fn rejects_invalid_fields(
        #[case] user_id: &str,
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: ValidationError,
    ) {
        let error = Location::new(user_id, latitude, longitude, "2024-01-20")
            .expect_err("location should be rejected");
        assert_eq!(error, expected);
    }

    #[test]
    fn decodes_snake_case_payload_with_object_id() {
        let location: Location = serde_json::from_value(json!({
            "user_id": { "$oid": "507f1f77bcf86cd799439011" },
            "latitude": 32.098424,
            "longitude": 34.802374,
            "last_updated": "2024-01-25T10:00:00.000Z"
        }))
        .expect("payload should decode");

        assert_eq!(location.user_id().as_ref(), "507f1f77bcf86cd799439011");
        assert_eq!(location.latitude(), 32.098424);
    }

    #[test]
    fn decoding_rejects_out_of_range_coordinates() {
        let result = serde_json::from_value::<Location>(json!({
            "user_id": "u1",
            "latitude": 120.0,
            "longitude": 0.0,
            "last_updated": "2024-01-20"
        }));
        let error = result.expect_err("coordinates out of range");
        assert!(error.to_string().contains("latitude"));
    }

    #[test]
    fn serialises_with_plain_user_id() {
        let location = Location::new("u1", 1.5, -2.5, "2024-01-20").expect("valid location");
        assert_eq!(
            serde_json::to_value(location).expect("serialise"),
            json!({
                "user_id": "u1",
                "latitude": 1.5,
                "longitude": -2.5,
                "last_updated": "2024-01-20"
            })
        );
    }
}
