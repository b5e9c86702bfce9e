//! Error taxonomy for token decoding and authorized requests.

pub mod api;
pub mod decode;

pub use api::{ApiError, UnauthorizedReason};
pub use decode::DecodeError;
