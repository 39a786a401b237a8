//! Client library for tracking users and their geographic positions through
//! a remote REST service.
//!
//! The crate is split along a hexagonal boundary:
//!
//! - [`domain`] owns the validated value objects, the request DTOs, the
//!   [`Transport`](domain::ports::Transport) port, and the
//!   [`LocationTracker`] facade that turns caller input into exchanges.
//! - [`outbound`] provides the `reqwest`-backed transport adapter.
//! - [`config`] holds the explicit client configuration value; the optional
//!   `settings` feature layers it from environment, CLI and files.
//!
//! # Example
//!
//! ```no_run
//! use location_tracker::{ClientConfig, LocationTracker, TrackerError};
//!
//! # async fn run() -> Result<(), TrackerError> {
//! let config = ClientConfig::new("https://tracking.example.com/")?;
//! let tracker = LocationTracker::over_http(&config)?;
//!
//! let user = tracker.create_user("alice")?.await?;
//! let location = tracker
//!     .update_location(user.id().as_ref(), 32.109333, 34.855499)?
//!     .await?;
//! assert_eq!(location.user_id(), user.id());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(feature = "settings")]
pub mod settings;

pub use config::{ClientConfig, ConfigError};
pub use domain::{
    Callback, CallbackTracker, Coordinates, Exchange, ExchangeError, Location, LocationTracker,
    Outcome, Timestamp, User, UserId, Username, ValidationError, ValidationKind,
};
pub use outbound::http::HttpTransport;
#[cfg(feature = "settings")]
pub use settings::TrackerSettings;

/// Umbrella error for callers driving exchanges with `?`.
///
/// Validation failures surface before an exchange starts; exchange failures
/// surface when it resolves. Both convert into this type.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Input rejected before dispatch.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The exchange failed at the network or server level.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    /// The client configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
