//! Outbound HTTP: the transport seam, the server's response envelope, and the
//! client that attaches the session token to every request.

pub mod client;
pub mod envelope;
pub mod transport;

pub use client::AuthorizedClient;
pub use transport::{
    InboundResponse, Method, OutboundRequest, ReqwestTransport, Transport, TransportError,
};
