//! Train route HTTP client.
//!
//! Resolves a train number to its ordered station codes. The train-details
//! endpoint is tried first; when it fails or yields nothing usable, the
//! live-status endpoint's route listing is used instead.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, info};

use crate::availability::CLIENT_USER_AGENT;
use crate::domain::{Route, StationCode, TrainNumber};

use super::RouteSource;
use super::error::RouteError;

/// Default base URL for the train information API.
const DEFAULT_BASE_URL: &str = "https://irctc-train-api.p.rapidapi.com";

/// RapidAPI host the key is scoped to.
const DEFAULT_HOST: &str = "irctc-train-api.p.rapidapi.com";

/// Separator between station name and code in train-details listings.
const NAME_CODE_SEPARATOR: &str = " - ";

/// Configuration for the route client.
#[derive(Debug, Clone)]
pub struct RouteClientConfig {
    /// RapidAPI key
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `x-rapidapi-host` header
    pub host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RouteClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            timeout_secs: 20,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the train information API.
#[derive(Debug, Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RouteClient {
    /// Create a new route client.
    pub fn new(config: RouteClientConfig) -> Result<Self, RouteError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| RouteError::NotConfigured("invalid API key format".into()))?;
        let host = HeaderValue::from_str(&config.host)
            .map_err(|_| RouteError::NotConfigured("invalid API host".into()))?;
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
        })
    }

    /// Fetch the train-details payload.
    pub async fn train_details(&self, train: &TrainNumber) -> Result<Value, RouteError> {
        self.get_json("/api/v1/train-details", &[("trainNo", train.as_str())])
            .await
    }

    /// Fetch the live-status payload for today's run.
    pub async fn live_status(&self, train: &TrainNumber) -> Result<Value, RouteError> {
        self.get_json(
            "/api/v1/live-train-status",
            &[("trainNo", train.as_str()), ("startDay", "0")],
        )
        .await
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, RouteError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RouteError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RouteError::Json {
            message: e.to_string(),
        })
    }

    /// Station codes from train-details, falling back to live status.
    async fn station_codes(&self, train: &TrainNumber) -> Result<Vec<StationCode>, String> {
        let primary = match self.train_details(train).await {
            Ok(payload) => codes_from_train_details(&payload),
            Err(e) => Err(e.to_string()),
        };

        let primary_err = match primary {
            Ok(codes) => return Ok(codes),
            Err(e) => e,
        };

        info!(train = %train, error = %primary_err, "train details unusable, trying live status");

        let fallback = match self.live_status(train).await {
            Ok(payload) => codes_from_live_status(&payload),
            Err(e) => Err(e.to_string()),
        };

        fallback.map_err(|e| format!("train details: {primary_err}; live status: {e}"))
    }
}

impl RouteSource for RouteClient {
    async fn resolve_route(&self, train: &TrainNumber) -> Result<Route, RouteError> {
        let codes = self
            .station_codes(train)
            .await
            .map_err(|reason| RouteError::RouteUnavailable {
                train: train.clone(),
                reason,
            })?;

        debug!(train = %train, stations = codes.len(), "resolved route");

        Route::new(codes).map_err(|e| RouteError::RouteUnavailable {
            train: train.clone(),
            reason: e.to_string(),
        })
    }
}

/// Read station codes from a train-details payload.
///
/// Stations are listed as `"CHENNAI CENTRAL - MAS"`; the code is the text
/// after the last separator.
pub fn codes_from_train_details(payload: &Value) -> Result<Vec<StationCode>, String> {
    if let Some(error) = payload.get("error") {
        return Err(format!("API error: {error}"));
    }
    if !payload.get("status").is_some_and(truthy) {
        return Err("API returned status: false".to_string());
    }

    let stops = payload
        .pointer("/data/trainRoute")
        .and_then(Value::as_array)
        .ok_or("no trainRoute in payload")?;

    let mut codes = Vec::with_capacity(stops.len());
    for stop in stops {
        let Some(name) = stop.get("stationName").and_then(Value::as_str) else {
            continue;
        };
        let Some((_, raw_code)) = name.rsplit_once(NAME_CODE_SEPARATOR) else {
            continue;
        };
        match StationCode::parse_normalized(raw_code) {
            Ok(code) => codes.push(code),
            Err(e) => debug!(station = name, error = %e, "skipping malformed station code"),
        }
    }

    if codes.is_empty() {
        return Err("could not extract station codes".to_string());
    }
    Ok(codes)
}

/// Read station codes from a live-status payload (`route[].stationCode`).
pub fn codes_from_live_status(payload: &Value) -> Result<Vec<StationCode>, String> {
    if let Some(error) = payload.get("error") {
        return Err(format!("API error: {error}"));
    }

    let stops = payload
        .get("route")
        .and_then(Value::as_array)
        .ok_or("no route in payload")?;

    let mut codes = Vec::with_capacity(stops.len());
    for stop in stops {
        let Some(raw_code) = stop.get("stationCode").and_then(Value::as_str) else {
            continue;
        };
        match StationCode::parse_normalized(raw_code) {
            Ok(code) => codes.push(code),
            Err(e) => debug!(code = raw_code, error = %e, "skipping malformed station code"),
        }
    }

    if codes.is_empty() {
        return Err("could not extract station codes".to_string());
    }
    Ok(codes)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
