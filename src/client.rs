//! EventsApi factory and the paging seam between the SDK and the loader.

use rsvp_api::{ApiConfig, ApiError, Attendee, EventsApi, Page};
use tracing::debug;

use crate::pager::PageFetcher;

/// Default API base URL when neither `--api-url` nor `RSVP_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Build an [`EventsApi`] client. Precedence: `--api-url` flag, then the
/// `RSVP_API_URL` environment variable, then [`DEFAULT_API_URL`].
pub fn connect(api_url: Option<&str>) -> EventsApi {
    let base_url = api_url
        .map(str::to_string)
        .or_else(|| std::env::var("RSVP_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    debug!(url = %base_url, "using events API");
    EventsApi::new(ApiConfig { base_url })
}

/// Attendee rosters are the paginated collection the loader drives; the
/// collection identity is the event ID.
impl PageFetcher<Attendee> for EventsApi {
    async fn fetch_page(
        &self,
        collection: i64,
        page: u32,
        size: u32,
    ) -> Result<Page<Attendee>, ApiError> {
        self.event_attendees(collection, page, size).await
    }
}
