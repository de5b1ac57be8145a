//! Endpoint tests against a mock HTTP server.
//!
//! Covers the envelope handling of the REST layer: success payloads, paged
//! metadata, HTTP errors carrying envelope or framework error bodies,
//! `success: false` envelopes, malformed envelopes, and connectivity
//! failures.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rsvp_api::{ApiConfig, ApiError, EventsApi, RegisterAttendeeRequest};

fn client_for(server: &MockServer) -> EventsApi {
    EventsApi::new(ApiConfig {
        base_url: server.uri(),
    })
}

fn event_fixture(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Rust Meetup",
        "location": "Community Hall",
        "start_time": "2026-09-01T23:00:00",
        "end_time": "2026-09-02T02:00:00",
        "max_capacity": 120,
        "current_attendees": 45,
        "created_at": "2026-08-01T09:30:00",
        "updated_at": "2026-08-03T14:00:00",
        "is_full": false,
        "available_spots": 75,
        "capacity_percentage": 37.5
    })
}

#[tokio::test]
async fn test_list_events_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [event_fixture(1), event_fixture(2)],
            "message": "Events retrieved successfully"
        })))
        .mount(&server)
        .await;

    let events = client_for(&server).list_events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, 1);
    assert_eq!(events[1].name, "Rust Meetup");
}

#[tokio::test]
async fn test_event_attendees_passes_paging_and_returns_meta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/12/attendees"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": 11,
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "event_id": 12,
                "registered_at": "2026-08-02T10:00:00"
            }],
            "meta": {
                "page": 2,
                "size": 10,
                "total": 11,
                "pages": 2,
                "has_next": false,
                "has_previous": true
            }
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .event_attendees(12, 2, 10)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].email, "ada@example.com");
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total, 11);
    assert!(!page.meta.has_next);
}

#[tokio::test]
async fn test_register_attendee_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/12/attendees"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "id": 7,
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "event_id": 12,
                "registered_at": "2026-08-02T10:00:00"
            },
            "message": "Attendee registered successfully"
        })))
        .mount(&server)
        .await;

    let attendee = client_for(&server)
        .register_attendee(
            12,
            &RegisterAttendeeRequest {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(attendee.id, 7);
    assert_eq!(attendee.event_id, 12);
}

#[tokio::test]
async fn test_http_error_uses_envelope_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": "Event with id 99 not found",
            "code": "EventNotFoundError"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).get_event(99).await.unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Event with id 99 not found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_falls_back_to_detail_field() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/events/12/attendees/5"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({
                "detail": "Attendee is already registered for this event"
            })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .remove_attendee(12, 5)
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "Attendee is already registered for this event");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_false_envelope_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Event is at full capacity"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_events().await.unwrap_err();
    match err {
        ApiError::Api(message) => assert_eq!(message, "Event is at full capacity"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_without_data_is_malformed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "nothing here"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_events().await.unwrap_err();
    assert!(matches!(err, ApiError::Envelope(_)));
}

#[tokio::test]
async fn test_paged_success_without_meta_is_malformed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/12/attendees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": []
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .event_attendees(12, 1, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Envelope(_)));
}

#[tokio::test]
async fn test_delete_event_accepts_empty_data() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/events/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Event deleted successfully"
        })))
        .mount(&server)
        .await;

    client_for(&server).delete_event(12).await.unwrap();
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Nothing is listening on the mock server's port once it is dropped.
    let server = MockServer::start().await;
    let api = client_for(&server);
    drop(server);

    let err = api.list_events().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
