pub mod endpoints;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::types::{Envelope, Page};

/// HTTP client wrapper for the events REST API.
///
/// Every endpoint wraps its payload in a JSON envelope
/// (`{success, data, meta?, message?, error?}`); this layer unwraps the
/// envelope and maps its failure modes onto [`ApiError`].
#[derive(Debug, Clone)]
pub struct EventsHttpClient {
    client: Client,
    base_url: String,
}

impl EventsHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// Failure mapping: network errors become [`ApiError::Transport`],
    /// non-2xx statuses become [`ApiError::Http`] with the message pulled
    /// from the error body, and 2xx envelopes with `success: false` become
    /// [`ApiError::Api`].
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method.clone(), &url).query(query);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();
        debug!(method = %method, path, status = status.as_u16(), "api request");

        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: extract_error_message(&text, status),
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        if !envelope.success {
            let message = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "unknown API error".to_string());
            return Err(ApiError::Api(message));
        }

        Ok(envelope)
    }

    /// GET a single resource out of a success envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let envelope = self.request::<T, ()>(Method::GET, path, query, None).await?;
        require_data(envelope.data, path)
    }

    /// GET one page of a paginated collection; `meta` is mandatory.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Page<T>> {
        let envelope = self
            .request::<Vec<T>, ()>(Method::GET, path, query, None)
            .await?;
        let items = require_data(envelope.data, path)?;
        let meta = envelope.meta.ok_or_else(|| {
            ApiError::Envelope(format!("paged response from {path} is missing `meta`"))
        })?;
        Ok(Page { items, meta })
    }

    /// POST a JSON body, returning the created resource.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let envelope = self
            .request::<T, B>(Method::POST, path, &[], Some(body))
            .await?;
        require_data(envelope.data, path)
    }

    /// PUT a JSON body, returning the updated resource.
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let envelope = self
            .request::<T, B>(Method::PUT, path, &[], Some(body))
            .await?;
        require_data(envelope.data, path)
    }

    /// DELETE a resource. The success envelope carries no payload.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request::<serde_json::Value, ()>(Method::DELETE, path, &[], None)
            .await?;
        Ok(())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn require_data<T>(data: Option<T>, path: &str) -> Result<T> {
    data.ok_or_else(|| ApiError::Envelope(format!("success response from {path} is missing `data`")))
}

/// Pull a human-readable message out of an error body.
///
/// The service normally answers with its envelope (`error` field), but
/// framework-level rejections use `{"detail": ...}` instead; fall back to
/// the raw body, then to the status line.
fn extract_error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "detail"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
