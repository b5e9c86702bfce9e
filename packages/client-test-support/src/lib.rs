//! Client test support utilities
//!
//! Shared helpers for the client's integration tests: a scripted transport
//! standing in for the API server, token minting, fixtures, and unified
//! logging initialization.

pub mod fixtures;
pub mod logging;
pub mod tokens;
pub mod transport;

pub use fixtures::{client_with, event_json, events_body};
pub use transport::{Scripted, ScriptedTransport};
