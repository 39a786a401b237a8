//! Opaque server timestamps.
//!
//! The client never interprets timestamps; it only normalises the MongoDB
//! extended-JSON date shapes the server may emit into one string form.

use std::fmt;

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Opaque timestamp string as reported by the server.
///
/// Millisecond epoch values are rendered as ISO-8601 UTC with millisecond
/// precision, e.g. `2024-01-25T10:00:00.000Z`. String values pass through
/// untouched. The default value is empty and stands in for a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireTimestamp", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Render a millisecond epoch value as an ISO-8601 UTC timestamp.
    ///
    /// Returns `None` when the value is outside the representable range.
    ///
    /// # Examples
    /// ```
    /// use location_tracker::domain::Timestamp;
    ///
    /// let stamp = Timestamp::from_epoch_millis(1_706_176_800_000).expect("in range");
    /// assert_eq!(stamp.as_ref(), "2024-01-25T10:00:00.000Z");
    /// ```
    #[must_use]
    pub fn from_epoch_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|instant| Self(instant.to_rfc3339_opts(SecondsFormat::Millis, true)))
    }
}

impl AsRef<str> for Timestamp {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Plain(String),
    Extended {
        #[serde(rename = "$date")]
        date: WireDate,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireDate {
    Iso(String),
    Millis(i64),
    NumberLong {
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
}

impl TryFrom<WireTimestamp> for Timestamp {
    type Error = String;

    fn try_from(value: WireTimestamp) -> Result<Self, Self::Error> {
        match value {
            WireTimestamp::Plain(raw)
            | WireTimestamp::Extended {
                date: WireDate::Iso(raw),
            } => Ok(Self(raw)),
            WireTimestamp::Extended {
                date: WireDate::Millis(millis),
            } => millis_to_timestamp(millis),
            WireTimestamp::Extended {
                date: WireDate::NumberLong { number_long },
            } => {
                let millis = number_long
                    .parse::<i64>()
                    .map_err(|error| format!("invalid $numberLong date '{number_long}': {error}"))?;
                millis_to_timestamp(millis)
            }
        }
    }
}

fn millis_to_timestamp(millis: i64) -> Result<Timestamp, String> {
    Timestamp::from_epoch_millis(millis)
        .ok_or_else(|| format!("epoch milliseconds {millis} out of range"))
}

#[cfg(test)]
mod tests {
    //! Decoding coverage for the accepted timestamp shapes.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::plain(json!("2024-01-20"), "2024-01-20")]
    #[case::extended_iso(json!({ "$date": "2024-01-25T10:00:00.000Z" }), "2024-01-25T10:00:00.000Z")]
    #[case::extended_millis(json!({ "$date": 1_706_176_800_000_i64 }), "2024-01-25T10:00:00.000Z")]
    #[case::number_long(json!({ "$date": { "$numberLong": "1706176800123" } }), "2024-01-25T10:00:00.123Z")]
    fn decodes_supported_shapes(#[case] wire: serde_json::Value, #[case] expected: &str) {
        let stamp: Timestamp = serde_json::from_value(wire).expect("timestamp should decode");
        assert_eq!(stamp.as_ref(), expected);
    }

    #[test]
    fn rejects_malformed_number_long() {
        let result = serde_json::from_value::<Timestamp>(json!({ "$date": { "$numberLong": "soon" } }));
        assert!(result.is_err());
    }

    #[test]
    fn serialises_as_plain_string() {
        let stamp = Timestamp::from("2024-01-20");
        assert_eq!(serde_json::to_value(stamp).expect("serialise"), json!("2024-01-20"));
    }
}
