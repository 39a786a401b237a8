//! HTTP outbound adapter.
//!
//! A thin `reqwest` implementation of the
//! [`Transport`](crate::domain::ports::Transport) port, plus the production
//! wiring of [`LocationTracker`](crate::LocationTracker) over it.

mod transport;

pub use transport::{HttpTransport, USER_AGENT};
