//! EventsApi and BookingsApi against a scripted server.
//!
//! Run:
//!   cargo test --test services

mod common;

use client::errors::{ApiError, UnauthorizedReason};
use client::http::Method;
use client::services::EventSearch;
use client::{BookingRequest, BookingsApi, EventDraft, EventsApi, SessionStore};
use client_test_support::tokens::{admin_token, user_token};
use client_test_support::{client_with, event_json, events_body, ScriptedTransport};
use common::session_with;
use serde_json::json;
use time::macros::datetime;

#[tokio::test]
async fn list_events_reads_envelope() {
    let transport = ScriptedTransport::new();
    transport.respond_json(200, &events_body(&["1", "2"]));
    let session = session_with(&user_token());
    let api = EventsApi::new(client_with(&transport, &session));

    let events = api.list_events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].title, "Event 2");
}

#[tokio::test]
async fn null_data_lists_as_empty() {
    let transport = ScriptedTransport::new();
    transport
        .respond(200, r#"{"success":true,"message":"ok","data":null}"#)
        .respond(200, "null");
    let session = session_with(&admin_token());
    let api = EventsApi::new(client_with(&transport, &session));

    assert!(api.list_admin_events().await.unwrap().is_empty());
    assert!(api.list_events().await.unwrap().is_empty());
    assert_eq!(
        transport.requests()[0].url,
        "http://localhost:8080/api/admin/events"
    );
}

#[tokio::test]
async fn get_event_hits_item_path() {
    let transport = ScriptedTransport::new();
    transport.respond_json(200, &json!({"success": true, "data": event_json("e 1", "Gala")}));
    let session = session_with(&user_token());
    let api = EventsApi::new(client_with(&transport, &session));

    let event = api.get_event("e 1").await.unwrap();
    assert_eq!(event.title, "Gala");
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://localhost:8080/api/events/e%201"
    );
}

#[tokio::test]
async fn search_sends_only_set_filters() {
    let transport = ScriptedTransport::new();
    transport
        .respond_json(200, &events_body(&["9"]))
        .respond_json(200, &events_body(&[]));
    let session = session_with(&user_token());
    let api = EventsApi::new(client_with(&transport, &session));

    let search = EventSearch {
        text: Some("jazz".into()),
        min_seats: Some(2),
        ..EventSearch::default()
    };
    assert_eq!(api.search_events(&search).await.unwrap().len(), 1);
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://localhost:8080/api/events?search=jazz&minSeats=2"
    );

    api.search_events(&EventSearch::default()).await.unwrap();
    assert_eq!(
        transport.last_request().unwrap().url,
        "http://localhost:8080/api/events"
    );
}

#[tokio::test]
async fn create_and_update_send_trimmed_drafts() {
    let transport = ScriptedTransport::new();
    transport
        .respond_json(201, &json!({"success": true, "data": event_json("5", "Opening")}))
        .respond_json(200, &json!({"success": true, "data": event_json("5", "Closing")}));
    let session = session_with(&admin_token());
    let api = EventsApi::new(client_with(&transport, &session));
    let draft = EventDraft {
        title: " Opening ".into(),
        description: String::new(),
        date: datetime!(2031-01-01 10:00 UTC),
        location: " Atrium ".into(),
        capacity: 10,
    };

    let created = api.create_event(&draft).await.unwrap();
    assert_eq!(created.id, "5");
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, Method::Post);
    let body = sent.body.unwrap();
    assert_eq!(body["title"], "Opening");
    assert_eq!(body["location"], "Atrium");
    assert_eq!(body["date"], "2031-01-01T10:00:00Z");

    let updated = api.update_event("5", &draft).await.unwrap();
    assert_eq!(updated.title, "Closing");
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, "http://localhost:8080/api/admin/events/5");
}

#[tokio::test]
async fn create_without_data_is_not_reported_as_success() {
    let transport = ScriptedTransport::new();
    transport.respond(201, r#"{"success":true,"message":"Event created successfully"}"#);
    let session = session_with(&admin_token());
    let api = EventsApi::new(client_with(&transport, &session));
    let draft = EventDraft {
        title: "Opening".into(),
        description: String::new(),
        date: datetime!(2031-01-01 10:00 UTC),
        location: "Atrium".into(),
        capacity: 10,
    };

    assert!(matches!(
        api.create_event(&draft).await,
        Err(ApiError::Network { .. })
    ));
}

#[tokio::test]
async fn forbidden_admin_call_keeps_session() {
    let transport = ScriptedTransport::new();
    transport.respond(403, "Forbidden: Admin access required");
    let session = session_with(&user_token());
    let api = EventsApi::new(client_with(&transport, &session));

    let err = api.delete_event("3").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "Forbidden: Admin access required");
    assert!(session.has_token());
}

#[tokio::test]
async fn booking_lifecycle_paths() {
    let transport = ScriptedTransport::new();
    let booking = json!({"id": "b-1", "userID": "user-1", "eventID": "e-1", "seats": 2, "status": "booked"});
    transport
        .respond_json(201, &json!({"success": true, "data": booking}))
        .respond_json(200, &json!({"success": true, "data": booking}))
        .respond(200, r#"{"success":true,"message":"Booking cancelled successfully"}"#);
    let session = session_with(&user_token());
    let api = BookingsApi::new(client_with(&transport, &session));

    let created = api
        .create_booking(&BookingRequest::new("e-1", 2))
        .await
        .unwrap();
    assert_eq!(created.event_id, "e-1");
    assert_eq!(created.seats, 2);

    let fetched = api.get_booking("b-1").await.unwrap();
    assert_eq!(fetched, created);

    api.cancel_booking("b-1").await.unwrap();

    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://localhost:8080/api/bookings/");
    assert_eq!(sent[0].body, Some(json!({"eventID": "e-1", "seats": 2})));
    assert_eq!(sent[1].url, "http://localhost:8080/api/bookings/b-1");
    assert_eq!(sent[2].method, Method::Delete);
    assert_eq!(sent[2].url, "http://localhost:8080/api/bookings/b-1");
}

#[tokio::test]
async fn services_refuse_without_session() {
    let transport = ScriptedTransport::new();
    let session = SessionStore::in_memory();
    let bookings = BookingsApi::new(client_with(&transport, &session));

    assert_eq!(
        bookings.get_booking("b-1").await,
        Err(ApiError::Unauthorized(UnauthorizedReason::NoSession))
    );
    assert_eq!(transport.request_count(), 0);
}
