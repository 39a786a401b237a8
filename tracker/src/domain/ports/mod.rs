//! Domain ports for the outbound edge of the client.

mod macros;
pub(crate) use macros::define_port_error;

mod transport;

#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{
    HttpMethod, ResponseBody, Transport, TransportError, TransportRequest, TransportResponse,
};
