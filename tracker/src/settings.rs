//! Layered client settings loaded via OrthoConfig.
//!
//! This is the only place environment variables, CLI flags or config files
//! feed into the client; everything else takes an explicit [`ClientConfig`].

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::config::{ClientConfig, ConfigError};

/// Settings controlling the tracker client, prefixed `LOCATION_TRACKER`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOCATION_TRACKER")]
pub struct TrackerSettings {
    /// Base URL of the tracking service.
    pub base_url: Option<String>,
    /// Request timeout in whole seconds.
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
}

impl TrackerSettings {
    /// Build a [`ClientConfig`], falling back to defaults for unset values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configured base URL is invalid.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let base = match self.base_url.as_deref() {
            Some(url) => ClientConfig::new(url)?,
            None => ClientConfig::default(),
        };
        Ok(base.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and conversion.

    use super::*;
    use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> TrackerSettings {
        TrackerSettings::load_from_iter([OsString::from("location-tracker")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env([
            ("LOCATION_TRACKER_BASE_URL", None::<String>),
            ("LOCATION_TRACKER_TIMEOUT_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.base_url.is_none());
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT.as_secs());
        let config = settings.client_config().expect("defaults are valid");
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "LOCATION_TRACKER_BASE_URL",
                Some("http://localhost:4000/tracking".to_owned()),
            ),
            ("LOCATION_TRACKER_TIMEOUT_SECS", Some("5".to_owned())),
        ]);

        let config = load_from_empty_args()
            .client_config()
            .expect("overrides are valid");
        assert_eq!(config.base_url().as_str(), "http://localhost:4000/tracking/");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn invalid_base_url_is_reported() {
        let settings = TrackerSettings {
            base_url: Some("  ".to_owned()),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        };
        assert_eq!(settings.client_config(), Err(ConfigError::EmptyBaseUrl));
    }
}
