use std::sync::Arc;

use client::{AuthorizedClient, ClientConfig, SessionStore};
use serde_json::{json, Value};

use crate::transport::ScriptedTransport;

/// Client pointed at the default base URL, sending through `transport`.
pub fn client_with(transport: &ScriptedTransport, session: &SessionStore) -> AuthorizedClient {
    AuthorizedClient::new(
        ClientConfig::default(),
        session.clone(),
        Arc::new(transport.clone()),
    )
}

pub fn event_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "date": "2030-03-15T14:00:00Z",
        "location": "Main Hall",
        "capacity": 100
    })
}

/// Success envelope wrapping events with the given ids, in order.
pub fn events_body(ids: &[&str]) -> Value {
    let events: Vec<Value> = ids
        .iter()
        .map(|id| event_json(id, &format!("Event {id}")))
        .collect();
    json!({
        "success": true,
        "message": "Events retrieved successfully",
        "data": events
    })
}
