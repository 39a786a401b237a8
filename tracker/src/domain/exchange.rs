//! Mapping of transport results into typed outcomes.
//!
//! Every failed exchange collapses into exactly one [`ExchangeError`], whose
//! `Display` form is the message delivered to callbacks.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ports::{ResponseBody, TransportError, TransportResponse};

/// Error body text used when a failed response body cannot be read.
pub const UNREADABLE_BODY_PLACEHOLDER: &str = "Could not read error body";

/// Tracker operation, named the way it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `create_user`.
    CreateUser,
    /// `verify_user`.
    VerifyUser,
    /// `update_user_status`.
    UpdateStatus,
    /// `get_user_status`.
    GetUser,
    /// `update_location`.
    UpdateLocation,
    /// `get_user_location`.
    GetLocation,
}

impl Operation {
    /// Gerund phrase used in network error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::CreateUser => "creating user",
            Self::VerifyUser => "verifying user",
            Self::UpdateStatus => "updating status",
            Self::GetUser => "getting user",
            Self::UpdateLocation => "updating location",
            Self::GetLocation => "getting location",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Asynchronous failure of a single exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// No usable response arrived.
    #[error("Network error while {operation}: {message}")]
    Network {
        /// Operation that was in flight.
        operation: Operation,
        /// Underlying failure description.
        message: String,
    },
    /// The server answered with a failure status or an empty success body.
    #[error("Code: {status}, Error: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error body text, possibly empty.
        body: String,
    },
}

impl ExchangeError {
    /// Construct [`ExchangeError::Network`].
    #[must_use]
    pub fn network(operation: Operation, message: impl Into<String>) -> Self {
        Self::Network {
            operation,
            message: message.into(),
        }
    }

    /// Construct [`ExchangeError::Server`].
    #[must_use]
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// HTTP status, when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network { .. } => None,
            Self::Server { status, .. } => Some(*status),
        }
    }
}

/// Resolve a transport result into a decoded value or a single error.
pub(crate) fn resolve<V>(
    operation: Operation,
    result: Result<TransportResponse, TransportError>,
) -> Result<V, ExchangeError>
where
    V: DeserializeOwned,
{
    let response = result.map_err(|error| ExchangeError::network(operation, error.message()))?;
    let status = response.status();

    if !response.is_success() {
        return Err(ExchangeError::server(status, error_body_text(response.into_body())));
    }

    match response.into_body() {
        ResponseBody::Empty => Err(ExchangeError::server(status, "")),
        ResponseBody::Unreadable { message } => Err(ExchangeError::network(operation, message)),
        ResponseBody::Bytes(bytes) => decode_success_body(operation, status, &bytes),
    }
}

fn error_body_text(body: ResponseBody) -> String {
    match body {
        ResponseBody::Empty => String::new(),
        ResponseBody::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        ResponseBody::Unreadable { .. } => UNREADABLE_BODY_PLACEHOLDER.to_owned(),
    }
}

fn decode_success_body<V>(operation: Operation, status: u16, bytes: &[u8]) -> Result<V, ExchangeError>
where
    V: DeserializeOwned,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ExchangeError::server(status, ""));
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|error| ExchangeError::network(operation, error.to_string()))?;
    if value.is_null() {
        return Err(ExchangeError::server(status, ""));
    }

    serde_json::from_value(value).map_err(|error| ExchangeError::network(operation, error.to_string()))
}
