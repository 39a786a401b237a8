//! Reqwest-backed transport adapter.
//!
//! This adapter owns transport details only: URL joining, JSON bodies, and
//! mapping of send failures. Status codes and bodies are handed back to the
//! domain untouched.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::config::ClientConfig;
use crate::domain::LocationTracker;
use crate::domain::ports::{
    HttpMethod, ResponseBody, Transport, TransportError, TransportRequest, TransportResponse,
};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("location-tracker/", env!("CARGO_PKG_VERSION"));

/// Transport adapter that sends requests relative to one base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build an adapter with the configured timeout and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().clone(),
        })
    }

    /// Base URL every request path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| {
                TransportError::invalid_request(format!("cannot resolve path '{path}': {error}"))
            })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint(request.path())?;
        let mut builder = self
            .client
            .request(to_method(request.method()), url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;
        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => ResponseBody::from_bytes(bytes.to_vec()),
            Err(error) => ResponseBody::Unreadable {
                message: error.to_string(),
            },
        };
        Ok(TransportResponse::new(status, body))
    }
}

impl LocationTracker<HttpTransport> {
    /// Production wiring: a tracker talking HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn over_http(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        HttpTransport::new(config).map(Self::from_transport)
    }
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
    }
}

fn map_transport_error(error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_builder() {
        TransportError::invalid_request(error.to_string())
    } else {
        TransportError::connection(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network adapter helpers.

    use super::*;
    use rstest::rstest;

    fn transport(base_url: &str) -> HttpTransport {
        let config = ClientConfig::new(base_url).expect("valid base URL");
        HttpTransport::new(&config).expect("client builds")
    }

    #[rstest]
    #[case::root("http://localhost:8080", "api/users/create", "http://localhost:8080/api/users/create")]
    #[case::prefix("http://localhost:8080/v1", "api/users/42", "http://localhost:8080/v1/api/users/42")]
    #[case::leading_slash("http://localhost:8080/v1/", "/api/locations/update", "http://localhost:8080/v1/api/locations/update")]
    fn resolves_paths_beneath_base(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let url = transport(base).endpoint(path).expect("path resolves");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn keeps_encoded_segments() {
        let url = transport("http://localhost:8080")
            .endpoint("api/users/a%2Fb/status")
            .expect("path resolves");
        assert_eq!(url.path(), "/api/users/a%2Fb/status");
    }

    #[rstest]
    #[case(HttpMethod::Get, Method::GET)]
    #[case(HttpMethod::Post, Method::POST)]
    #[case(HttpMethod::Patch, Method::PATCH)]
    fn maps_methods(#[case] method: HttpMethod, #[case] expected: Method) {
        assert_eq!(to_method(method), expected);
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("location-tracker/"));
    }

    #[test]
    fn over_http_builds_client() {
        let config = ClientConfig::new("http://localhost:9999/prefix").expect("valid base URL");
        let tracker = LocationTracker::over_http(&config);
        assert!(tracker.is_ok());
    }
}
