//! Explicit client configuration.
//!
//! A [`ClientConfig`] is passed to the transport at construction time; the
//! library holds no global configuration state.

use std::sync::OnceLock;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Production endpoint used when no base URL is supplied.
pub const DEFAULT_BASE_URL: &str = "https://live-location-tracking-backend.vercel.app/";
/// Per-request timeout used when none is supplied.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static DEFAULT_URL: OnceLock<Url> = OnceLock::new();

fn default_url() -> &'static Url {
    DEFAULT_URL.get_or_init(|| {
        Url::parse(DEFAULT_BASE_URL)
            .unwrap_or_else(|error| panic!("default base URL failed to parse: {error}"))
    })
}

/// Errors raised while building a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Base URL was empty or whitespace.
    #[error("base URL must not be empty")]
    EmptyBaseUrl,
    /// Base URL could not be parsed or cannot carry relative paths.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// Rejected input.
        url: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Base endpoint and request timeout for a tracker client.
///
/// The base URL always ends with `/`, so relative API paths resolve beneath
/// any path prefix it carries.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use location_tracker::ClientConfig;
///
/// let config = ClientConfig::new("http://localhost:8080/tracking")?
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url().as_str(), "http://localhost:8080/tracking/");
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// # Ok::<(), location_tracker::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl Default for ClientConfig {
    /// # Panics
    ///
    /// Panics if [`DEFAULT_BASE_URL`] fails to parse, which would be a
    /// programming error.
    fn default() -> Self {
        Self {
            base_url: default_url().clone(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Parse a base URL, appending a trailing `/` when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] for blank input, or
    /// [`ConfigError::InvalidBaseUrl`] when the URL cannot be parsed or
    /// cannot serve as a base for relative paths.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Restore the default base URL and timeout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalised base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }

    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    let invalid = |message: String| ConfigError::InvalidBaseUrl {
        url: trimmed.to_owned(),
        message,
    };

    let url = Url::parse(&with_slash).map_err(|error| invalid(error.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_owned()));
    }
    Ok(url)
}
