//! Outbound adapters implementing domain ports.
//!
//! - **http**: `reqwest`-backed implementation of the transport port.

pub mod http;
