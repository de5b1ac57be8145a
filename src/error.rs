use thiserror::Error;

use crate::timezone::TimeError;

#[derive(Debug, Error)]
pub enum RsvpError {
    #[error(transparent)]
    Api(#[from] rsvp_api::ApiError),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("event not found: {0}")]
    EventNotFound(i64),

    #[error("terminal error: {0}")]
    Terminal(String),
}
