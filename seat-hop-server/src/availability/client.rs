//! Seat availability HTTP client.
//!
//! Queries the RapidAPI-hosted reservation availability endpoint. Handles
//! authentication headers and caps the number of requests in flight.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::domain::ProbeKey;

use super::error::AvailabilityError;
use super::prober::AvailabilitySource;

/// Default base URL for the availability API.
const DEFAULT_BASE_URL: &str = "https://irctc1.p.rapidapi.com";

/// RapidAPI host the key is scoped to.
const DEFAULT_HOST: &str = "irctc1.p.rapidapi.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 20;

/// Characters of an unparseable body kept for diagnostics.
const BODY_SNIPPET_CHARS: usize = 200;

/// User agent sent with every request.
pub(crate) const CLIENT_USER_AGENT: &str = concat!("seat-hop/", env!("CARGO_PKG_VERSION"));

/// Configuration for the availability client.
#[derive(Debug, Clone)]
pub struct AvailabilityClientConfig {
    /// RapidAPI key
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `x-rapidapi-host` header
    pub host: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AvailabilityClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 20,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Availability API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl AvailabilityClient {
    /// Create a new availability client with the given configuration.
    pub fn new(config: AvailabilityClientConfig) -> Result<Self, AvailabilityError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| AvailabilityError::NotConfigured("invalid API key format".into()))?;
        let host = HeaderValue::from_str(&config.host)
            .map_err(|_| AvailabilityError::NotConfigured("invalid API host".into()))?;
        headers.insert(HeaderName::from_static("x-rapidapi-key"), api_key);
        headers.insert(HeaderName::from_static("x-rapidapi-host"), host);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Get the raw availability payload for one query.
    pub async fn check_seat_availability(
        &self,
        key: &ProbeKey,
    ) -> Result<Value, AvailabilityError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| AvailabilityError::NotConfigured("semaphore closed".into()))?;

        let url = format!("{}/api/v1/checkSeatAvailability", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("trainNo", key.train.as_str().to_string()),
                ("fromStationCode", key.origin.as_str().to_string()),
                ("toStationCode", key.destination.as_str().to_string()),
                ("classType", key.class.as_str().to_string()),
                ("quota", key.quota.as_str().to_string()),
                ("date", key.date.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(AvailabilityError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AvailabilityError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AvailabilityError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        if body.trim().is_empty() {
            return Err(AvailabilityError::EmptyResponse);
        }

        serde_json::from_str(&body).map_err(|e| AvailabilityError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
        })
    }
}

impl AvailabilitySource for AvailabilityClient {
    async fn fetch_availability(&self, key: &ProbeKey) -> Result<Value, AvailabilityError> {
        self.check_seat_availability(key).await
    }
}
