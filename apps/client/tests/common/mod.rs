#![allow(dead_code)]

// tests/common/mod.rs
use client::SessionStore;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    client_test_support::logging::init();
}

/// Session holding `token`.
pub fn session_with(token: &str) -> SessionStore {
    let session = SessionStore::in_memory();
    session.establish(token).expect("test token should be stored");
    session
}
