#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod controllers;
pub mod entities;
pub mod error;
pub mod errors;
pub mod http;
pub mod services;
pub mod session;

// Re-exports for public API
pub use auth::Claims;
pub use config::ClientConfig;
pub use controllers::{Activation, ListState, MutationOutcome, ResourceListController, Route, Surface};
pub use entities::{Booking, BookingRequest, Event, EventDraft};
pub use error::ClientError;
pub use errors::{ApiError, DecodeError, UnauthorizedReason};
pub use http::{AuthorizedClient, Method, Transport};
pub use services::{BookingsApi, EventsApi};
pub use session::{SessionStatus, SessionStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    client_test_support::logging::init();
}
