use serde::{Deserialize, Serialize};

use super::{FieldErrors, Resource};

/// A booking as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: String,
    #[serde(rename = "eventID", alias = "EventID")]
    pub event_id: String,
    #[serde(alias = "Seats")]
    pub seats: u32,
    #[serde(default = "default_status", alias = "Status")]
    pub status: String,
}

fn default_status() -> String {
    "booked".to_string()
}

impl Resource for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "eventID")]
    pub event_id: String,
    pub seats: u32,
}

impl BookingRequest {
    pub fn new(event_id: impl Into<String>, seats: u32) -> Self {
        Self {
            event_id: event_id.into(),
            seats,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.event_id.trim().is_empty() {
            errors.insert("eventID".into(), "Event ID is required".into());
        }
        if self.seats == 0 {
            errors.insert("seats".into(), "Seats must be a positive integer".into());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
