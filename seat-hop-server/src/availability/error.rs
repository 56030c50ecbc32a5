//! Availability client error types.

use std::fmt;
use std::time::Duration;

/// Errors from fetching a seat availability payload.
///
/// These never leave the prober: a failed fetch becomes a non-bookable
/// probe result whose status carries the error's display text.
#[derive(Debug)]
pub enum AvailabilityError {
    /// HTTP request failed (network error, connection reset, etc.)
    Http(reqwest::Error),

    /// No answer within the per-call deadline
    Timeout(Duration),

    /// Response body was not JSON
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// Empty response body
    EmptyResponse,

    /// Client could not be set up
    NotConfigured(String),
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityError::Http(e) => write!(f, "HTTP error: {e}"),
            AvailabilityError::Timeout(after) => {
                write!(f, "timed out after {}ms", after.as_millis())
            }
            AvailabilityError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            AvailabilityError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            AvailabilityError::RateLimited => write!(f, "rate limited by availability API"),
            AvailabilityError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            AvailabilityError::EmptyResponse => write!(f, "empty response"),
            AvailabilityError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for AvailabilityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AvailabilityError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AvailabilityError {
    fn from(err: reqwest::Error) -> Self {
        AvailabilityError::Http(err)
    }
}
