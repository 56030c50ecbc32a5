//! Route resolution error types.

use crate::domain::TrainNumber;

/// Errors that can occur when resolving a train's route.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check RAPIDAPI_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No usable station list for the train
    #[error("route unavailable for train {train}: {reason}")]
    RouteUnavailable { train: TrainNumber, reason: String },

    /// Client could not be set up
    #[error("not configured: {0}")]
    NotConfigured(String),
}
