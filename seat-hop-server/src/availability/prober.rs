//! Single availability probes.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{ProbeKey, ProbeResult};

use super::error::AvailabilityError;
use super::payload::read_status;

/// Source of raw seat availability payloads.
///
/// This abstraction allows the planner to be tested with mock data and
/// keeps transport details out of the search.
pub trait AvailabilitySource {
    /// Fetch the availability payload for one (origin, destination) query.
    fn fetch_availability(
        &self,
        key: &ProbeKey,
    ) -> impl Future<Output = Result<Value, AvailabilityError>> + Send;
}

/// Ask `source` once whether the journey in `key` is bookable.
///
/// Never fails: a transport error, a timeout or an unreadable payload all
/// give a non-bookable result whose status starts with `ERROR:`. There is
/// no retry and no caching at this level.
pub async fn probe<A: AvailabilitySource>(
    source: &A,
    key: &ProbeKey,
    timeout: Duration,
) -> ProbeResult {
    let outcome = tokio::time::timeout(timeout, source.fetch_availability(key)).await;

    let result = match outcome {
        Ok(Ok(payload)) => read_status(&payload, key.date),
        Ok(Err(e)) => ProbeResult::error(e),
        Err(_) => ProbeResult::error(AvailabilityError::Timeout(timeout)),
    };

    if result.is_error() {
        warn!(
            origin = %key.origin,
            destination = %key.destination,
            status = %result.status,
            "probe failed, treating segment as unavailable"
        );
    } else {
        debug!(
            origin = %key.origin,
            destination = %key.destination,
            bookable = result.bookable,
            status = %result.status,
            "probed segment"
        );
    }

    result
}
