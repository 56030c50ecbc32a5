//! Mock availability source for testing without API access.
//!
//! Serves statuses from an in-memory table shaped like live API payloads,
//! counts upstream calls, and can simulate slow or failing segments.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::{ProbeKey, StationCode};

use super::error::AvailabilityError;
use super::prober::AvailabilitySource;

/// Status reported for pairs missing from the table.
const UNLISTED_STATUS: &str = "NOT AVAILABLE";

/// On-disk mock data: `{"availability": {"COA-MS": "AVAILABLE-0004"}}`.
#[derive(Debug, Deserialize)]
struct MockFile {
    #[serde(default)]
    availability: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct Counters {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Availability source backed by a static table.
#[derive(Debug, Clone, Default)]
pub struct MockAvailability {
    statuses: Arc<HashMap<(StationCode, StationCode), String>>,
    failing: Arc<HashSet<(StationCode, StationCode)>>,
    delay: Duration,
    counters: Arc<Counters>,
}

impl MockAvailability {
    /// Create an empty table: every pair reports `NOT AVAILABLE`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `status` for the pair.
    pub fn with_status(mut self, origin: StationCode, destination: StationCode, status: &str) -> Self {
        Arc::make_mut(&mut self.statuses).insert((origin, destination), status.to_string());
        self
    }

    /// Fail every query for the pair with a transport error.
    pub fn with_failure(mut self, origin: StationCode, destination: StationCode) -> Self {
        Arc::make_mut(&mut self.failing).insert((origin, destination));
        self
    }

    /// Delay every answer, to exercise concurrency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Load a table from a JSON file.
    ///
    /// Keys are `"FROM-TO"` station code pairs; values are raw statuses.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AvailabilityError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AvailabilityError::NotConfigured(format!("failed to read {}: {e}", path.display()))
        })?;
        let file: MockFile = serde_json::from_str(&json).map_err(|e| AvailabilityError::Json {
            message: e.to_string(),
            body: None,
        })?;

        let mut statuses = HashMap::with_capacity(file.availability.len());
        for (pair, status) in file.availability {
            let parsed = pair.split_once('-').and_then(|(from, to)| {
                Some((
                    StationCode::parse_normalized(from).ok()?,
                    StationCode::parse_normalized(to).ok()?,
                ))
            });
            let Some(pair_codes) = parsed else {
                return Err(AvailabilityError::NotConfigured(format!(
                    "invalid station pair in mock data: {pair}"
                )));
            };
            statuses.insert(pair_codes, status);
        }

        Ok(Self {
            statuses: Arc::new(statuses),
            ..Self::default()
        })
    }

    /// Number of queries answered so far.
    pub fn call_count(&self) -> usize {
        self.counters.calls.load(Ordering::SeqCst)
    }

    /// Highest number of queries that were in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak_in_flight.load(Ordering::SeqCst)
    }

    fn payload(&self, key: &ProbeKey) -> Value {
        let status = self
            .statuses
            .get(&(key.origin, key.destination))
            .map(String::as_str)
            .unwrap_or(UNLISTED_STATUS);

        json!({
            "status": true,
            "data": [{
                "date": key.date.format("%Y-%m-%d").to_string(),
                "current_status": status,
            }]
        })
    }
}

impl AvailabilitySource for MockAvailability {
    async fn fetch_availability(&self, key: &ProbeKey) -> Result<Value, AvailabilityError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&(key.origin, key.destination)) {
            return Err(AvailabilityError::ApiError {
                status: 502,
                message: "Bad Gateway".to_string(),
            });
        }

        Ok(self.payload(key))
    }
}
