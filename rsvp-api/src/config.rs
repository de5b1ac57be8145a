/// Configuration for the events API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, including the version prefix
    /// (e.g. `http://localhost:8000/api/v1`).
    pub base_url: String,
}
