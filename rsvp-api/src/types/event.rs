use serde::{Deserialize, Serialize};

/// An event as returned by the service.
///
/// Timestamps (`start_time`, `end_time`, `created_at`, `updated_at`) are
/// ISO-8601 instants, UTC by contract; they are kept as strings on the wire
/// type and interpreted by the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: u32,
    pub current_attendees: u32,
    pub created_at: String,
    pub updated_at: String,
    pub is_full: bool,
    pub available_spots: u32,
    pub capacity_percentage: f64,
}

/// Body for `POST /events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: u32,
}

/// Body for `PUT /events/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u32>,
}
