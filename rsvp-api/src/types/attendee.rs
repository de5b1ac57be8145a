use serde::{Deserialize, Serialize};

/// A registered attendee of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub event_id: i64,
    pub registered_at: String,
}

/// Body for `POST /events/{id}/attendees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAttendeeRequest {
    pub name: String,
    pub email: String,
}
