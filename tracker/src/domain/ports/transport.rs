//! Driven port for exchanging JSON messages with the tracking service.
//!
//! The domain owns the request and response shapes so the tracker can be
//! exercised against any transport, including in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// HTTP verbs used by the tracking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Read-only request.
    Get,
    /// Create or command request.
    Post,
    /// Partial update request.
    Patch,
}

/// One outbound request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    method: HttpMethod,
    path: String,
    body: Option<Value>,
}

impl TransportRequest {
    /// Build a request from its parts.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }

    /// Build a `GET` request without a body.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// Build a `POST` request carrying a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Build a `PATCH` request carrying a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Patch,
            path: path.into(),
            body: Some(body),
        }
    }

    /// Request verb.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path relative to the base URL, e.g. `api/users/create`.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Response body as received by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// No bytes were received.
    Empty,
    /// Raw body bytes.
    Bytes(Vec<u8>),
    /// The status arrived but the body could not be read.
    Unreadable {
        /// Why reading failed.
        message: String,
    },
}

impl ResponseBody {
    /// Wrap raw bytes, mapping an empty buffer to [`ResponseBody::Empty`].
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let raw: Vec<u8> = bytes.into();
        if raw.is_empty() {
            Self::Empty
        } else {
            Self::Bytes(raw)
        }
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    body: ResponseBody,
}

impl TransportResponse {
    /// Pair a status code with its body.
    #[must_use]
    pub const fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// Convenience constructor for a JSON value body.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, ResponseBody::from_bytes(body.to_string()))
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Received body.
    #[must_use]
    pub const fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Consume the response, yielding its body.
    #[must_use]
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

define_port_error! {
    /// Failures that prevent a response from being received at all.
    pub enum TransportError {
        /// Connection could not be established or was dropped.
        Connection {
            /// Underlying failure description.
            message: String,
        } => "connection failed: {message}",
        /// The exchange exceeded the configured timeout.
        Timeout {
            /// Underlying failure description.
            message: String,
        } => "request timed out: {message}",
        /// The request could not be built or sent.
        InvalidRequest {
            /// Underlying failure description.
            message: String,
        } => "request invalid: {message}",
    }
}

impl TransportError {
    /// Failure description without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message }
            | Self::Timeout { message }
            | Self::InvalidRequest { message } => message.as_str(),
        }
    }
}

/// Port for performing one request/response exchange.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return whatever status and body came back.
    ///
    /// Non-2xx statuses are not errors at this layer; only failures that
    /// prevent a response from arriving yield [`TransportError`].
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use location_tracker::domain::ports::{Transport, TransportRequest};
    ///
    /// let response = transport.execute(TransportRequest::get("api/users/42")).await?;
    /// assert!(response.is_success());
    /// ```
    async fn execute(&self, request: TransportRequest)
    -> Result<TransportResponse, TransportError>;
}
