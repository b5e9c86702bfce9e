use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{FieldErrors, Resource};

pub const MAX_CAPACITY: u32 = 10_000;
pub const MAX_DESCRIPTION_CHARS: usize = 1_000;
const MIN_TEXT_CHARS: usize = 3;

/// An event as the API returns it.
///
/// Aliases accept the capitalized field names the server emits when it
/// serializes its model without explicit JSON names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(with = "time::serde::rfc3339", alias = "Date")]
    pub date: OffsetDateTime,
    #[serde(alias = "Location")]
    pub location: String,
    #[serde(alias = "Capacity")]
    pub capacity: u32,
}

impl Resource for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating or editing an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub location: String,
    pub capacity: u32,
}

impl EventDraft {
    /// Check the draft against the same rules the server applies.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.validate_at(OffsetDateTime::now_utc())
    }

    pub fn validate_at(&self, now: OffsetDateTime) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title".into(), "Title is required".into());
        } else if title.chars().count() < MIN_TEXT_CHARS {
            errors.insert(
                "title".into(),
                "Title must be at least 3 characters long".into(),
            );
        }

        if self.date <= now {
            errors.insert("date".into(), "Event date must be in the future".into());
        }

        let location = self.location.trim();
        if location.is_empty() {
            errors.insert("location".into(), "Location is required".into());
        } else if location.chars().count() < MIN_TEXT_CHARS {
            errors.insert(
                "location".into(),
                "Location must be at least 3 characters long".into(),
            );
        }

        if self.capacity == 0 {
            errors.insert(
                "capacity".into(),
                "Capacity must be a positive integer".into(),
            );
        } else if self.capacity > MAX_CAPACITY {
            errors.insert("capacity".into(), "Capacity cannot exceed 10000".into());
        }

        if self.description.trim().chars().count() > MAX_DESCRIPTION_CHARS {
            errors.insert(
                "description".into(),
                "Description cannot exceed 1000 characters".into(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy with surrounding whitespace removed from text fields.
    pub fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date,
            location: self.location.trim().to_string(),
            capacity: self.capacity,
        }
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date,
            location: event.location.clone(),
            capacity: event.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::{Event, EventDraft};

    fn draft() -> EventDraft {
        EventDraft {
            title: "Rust Meetup".into(),
            description: "Talks and pizza".into(),
            date: datetime!(2030-03-15 14:00 UTC),
            location: "Berlin".into(),
            capacity: 120,
        }
    }

    #[test]
    fn parses_api_shape() {
        let event: Event = serde_json::from_value(json!({
            "id": "42",
            "title": "Rust Meetup",
            "description": "Talks",
            "date": "2030-03-15T14:00:00Z",
            "location": "Berlin",
            "capacity": 120
        }))
        .unwrap();
        assert_eq!(event.id, "42");
        assert_eq!(event.date, datetime!(2030-03-15 14:00 UTC));
    }

    #[test]
    fn parses_capitalized_server_model() {
        let event: Event = serde_json::from_value(json!({
            "ID": "7",
            "Title": "Concert",
            "Description": "",
            "Date": "2030-01-01T20:00:00+01:00",
            "Location": "Hall",
            "Capacity": 500,
            "CreatedAt": "2024-01-01T00:00:00Z",
            "DeletedAt": null
        }))
        .unwrap();
        assert_eq!(event.id, "7");
        assert_eq!(event.capacity, 500);
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let result = serde_json::from_value::<Event>(json!({
            "id": "1", "title": "t", "date": "2030-01-01T00:00:00Z",
            "location": "l", "capacity": -1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate_at(datetime!(2025-01-01 0:00 UTC)).is_ok());
    }

    #[test]
    fn collects_every_field_error() {
        let bad = EventDraft {
            title: " ab ".into(),
            description: "x".repeat(1001),
            date: datetime!(2020-01-01 0:00 UTC),
            location: "".into(),
            capacity: 0,
        };
        let errors = bad.validate_at(datetime!(2025-01-01 0:00 UTC)).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors["title"], "Title must be at least 3 characters long");
        assert_eq!(errors["location"], "Location is required");
        assert_eq!(errors["capacity"], "Capacity must be a positive integer");
    }

    #[test]
    fn capacity_upper_bound() {
        let mut d = draft();
        d.capacity = 10_001;
        let errors = d.validate_at(datetime!(2025-01-01 0:00 UTC)).unwrap_err();
        assert_eq!(errors["capacity"], "Capacity cannot exceed 10000");
    }

    #[test]
    fn draft_serializes_rfc3339_date() {
        let value = serde_json::to_value(draft()).unwrap();
        assert_eq!(value["date"], "2030-03-15T14:00:00Z");
    }
}
