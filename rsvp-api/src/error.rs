use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure: connection refused, DNS, timeout, TLS.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the envelope `error` field when the
    /// body parses, the raw body otherwise.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope reports `success: false`.
    #[error("API error: {0}")]
    Api(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid JSON that violates the envelope contract,
    /// e.g. a success envelope with no `data`.
    #[error("malformed envelope: {0}")]
    Envelope(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
