use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::item_path;
use crate::entities::{Event, EventDraft};
use crate::errors::ApiError;
use crate::http::AuthorizedClient;

pub const EVENTS_PATH: &str = "/api/events";
pub const ADMIN_EVENTS_PATH: &str = "/api/admin/events";

/// Filters accepted by the event search endpoint. Unset filters are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSearch {
    pub text: Option<String>,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
    pub min_seats: Option<u32>,
}

impl EventSearch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.min_seats.is_none()
    }

    /// Query string without the leading `?`.
    pub fn query_string(&self) -> Result<String, time::error::Format> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(text) = &self.text {
            pairs.push(("search", text.clone()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format(&Rfc3339)?));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format(&Rfc3339)?));
        }
        if let Some(min) = self.min_seats {
            pairs.push(("minSeats", min.to_string()));
        }
        Ok(pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&"))
    }
}

#[derive(Clone)]
pub struct EventsApi {
    client: AuthorizedClient,
}

impl EventsApi {
    pub fn new(client: AuthorizedClient) -> Self {
        Self { client }
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.client
            .get::<Option<Vec<Event>>>(EVENTS_PATH)
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn list_admin_events(&self) -> Result<Vec<Event>, ApiError> {
        self.client
            .get::<Option<Vec<Event>>>(ADMIN_EVENTS_PATH)
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn get_event(&self, id: &str) -> Result<Event, ApiError> {
        self.client.get(&item_path(EVENTS_PATH, id)).await
    }

    pub async fn search_events(&self, search: &EventSearch) -> Result<Vec<Event>, ApiError> {
        if search.is_empty() {
            return self.list_events().await;
        }
        let query = search
            .query_string()
            .map_err(|e| ApiError::network(format!("failed to encode search: {e}")))?;
        self.client
            .get::<Option<Vec<Event>>>(&format!("{EVENTS_PATH}?{query}"))
            .await
            .map(Option::unwrap_or_default)
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        self.client.post(ADMIN_EVENTS_PATH, &draft.trimmed()).await
    }

    pub async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<Event, ApiError> {
        self.client
            .put(&item_path(ADMIN_EVENTS_PATH, id), &draft.trimmed())
            .await
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&item_path(ADMIN_EVENTS_PATH, id)).await
    }
}
