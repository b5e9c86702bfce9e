use super::item_path;
use crate::entities::{Booking, BookingRequest};
use crate::errors::ApiError;
use crate::http::AuthorizedClient;

/// The server routes the whole subtree, so the collection keeps its slash.
pub const BOOKINGS_PATH: &str = "/api/bookings/";

#[derive(Clone)]
pub struct BookingsApi {
    client: AuthorizedClient,
}

impl BookingsApi {
    pub fn new(client: AuthorizedClient) -> Self {
        Self { client }
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        self.client.post(BOOKINGS_PATH, request).await
    }

    pub async fn get_booking(&self, id: &str) -> Result<Booking, ApiError> {
        self.client.get(&item_path(BOOKINGS_PATH, id)).await
    }

    pub async fn cancel_booking(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&item_path(BOOKINGS_PATH, id)).await
    }
}
