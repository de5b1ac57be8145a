use crate::config::ApiConfig;
use crate::error::Result;
use crate::rest::EventsHttpClient;
use crate::types::*;

/// Main client for the events service.
#[derive(Debug, Clone)]
pub struct EventsApi {
    /// Base URL of the service.
    pub base_url: String,
    /// HTTP client.
    pub http: EventsHttpClient,
}

impl EventsApi {
    /// Create a new client. No request is made until an endpoint is called.
    pub fn new(config: ApiConfig) -> Self {
        let http = EventsHttpClient::new(&config.base_url);
        Self {
            base_url: config.base_url,
            http,
        }
    }

    // --- REST delegates ---

    /// Get all upcoming events.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.http.list_events().await
    }

    /// Get one event by ID.
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        self.http.get_event(event_id).await
    }

    /// Create a new event.
    pub async fn create_event(&self, req: &CreateEventRequest) -> Result<Event> {
        self.http.create_event(req).await
    }

    /// Update an existing event.
    pub async fn update_event(&self, event_id: i64, req: &UpdateEventRequest) -> Result<Event> {
        self.http.update_event(event_id, req).await
    }

    /// Delete an event.
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        self.http.delete_event(event_id).await
    }

    /// Get one page of an event's attendee roster.
    pub async fn event_attendees(
        &self,
        event_id: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<Attendee>> {
        self.http.event_attendees(event_id, page, size).await
    }

    /// Register an attendee for an event.
    pub async fn register_attendee(
        &self,
        event_id: i64,
        req: &RegisterAttendeeRequest,
    ) -> Result<Attendee> {
        self.http.register_attendee(event_id, req).await
    }

    /// Remove an attendee from an event.
    pub async fn remove_attendee(&self, event_id: i64, attendee_id: i64) -> Result<()> {
        self.http.remove_attendee(event_id, attendee_id).await
    }
}
