use crate::error::Result;
use crate::rest::EventsHttpClient;
use crate::types::*;

impl EventsHttpClient {
    // --- Events ---

    /// GET /events - All upcoming events.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.get("/events", &[]).await
    }

    /// GET /events/{id} - One event.
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        self.get(&format!("/events/{event_id}"), &[]).await
    }

    /// POST /events - Create an event.
    pub async fn create_event(&self, req: &CreateEventRequest) -> Result<Event> {
        self.post("/events", req).await
    }

    /// PUT /events/{id} - Update an event; absent fields keep their value.
    pub async fn update_event(&self, event_id: i64, req: &UpdateEventRequest) -> Result<Event> {
        self.put(&format!("/events/{event_id}"), req).await
    }

    /// DELETE /events/{id} - Delete an event and its registrations.
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        self.delete(&format!("/events/{event_id}")).await
    }

    // --- Attendees ---

    /// GET /events/{id}/attendees?page=&size= - Paged attendee roster.
    pub async fn event_attendees(
        &self,
        event_id: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<Attendee>> {
        let page_str = page.to_string();
        let size_str = size.to_string();
        self.get_paged(
            &format!("/events/{event_id}/attendees"),
            &[("page", page_str.as_str()), ("size", size_str.as_str())],
        )
        .await
    }

    /// POST /events/{id}/attendees - Register an attendee.
    pub async fn register_attendee(
        &self,
        event_id: i64,
        req: &RegisterAttendeeRequest,
    ) -> Result<Attendee> {
        self.post(&format!("/events/{event_id}/attendees"), req).await
    }

    /// DELETE /events/{id}/attendees/{attendee_id} - Remove a registration.
    pub async fn remove_attendee(&self, event_id: i64, attendee_id: i64) -> Result<()> {
        self.delete(&format!("/events/{event_id}/attendees/{attendee_id}"))
            .await
    }
}
