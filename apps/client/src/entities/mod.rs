pub mod booking;
pub mod event;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

pub use booking::{Booking, BookingRequest};
pub use event::{Event, EventDraft};

/// Field name to message, the shape the server uses for validation failures.
pub type FieldErrors = BTreeMap<String, String>;

/// A server-owned record with a stable, server-assigned id.
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
}
