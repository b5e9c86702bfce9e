//! Session state derived from a stored bearer token.

pub mod state;
pub mod store;

pub use state::{SessionStatus, SessionStore};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
