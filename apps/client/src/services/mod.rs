//! Typed facades over the events API.

pub mod bookings;
pub mod events;

pub use bookings::BookingsApi;
pub use events::{EventSearch, EventsApi};

/// Path of one item inside a collection, with the id percent-encoded.
pub fn item_path(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}
