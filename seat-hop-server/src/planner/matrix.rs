//! Discovery of bookable segments.
//!
//! The full route is probed first. Only if that fails is every
//! (origin, destination) pair of the route probed, through a bounded pool
//! of concurrent requests feeding the search's [`ProbeCache`].

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::availability::{AvailabilitySource, probe};
use crate::cache::ProbeCache;
use crate::domain::{ProbeKey, ProbeResult, Route, Segment, Span, StationCode, TicketRequest};

use super::config::PlannerConfig;

/// One probed pair and what it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRecord {
    pub span: Span,
    pub origin: StationCode,
    pub destination: StationCode,
    pub result: ProbeResult,
}

/// Everything learned about a route's availability.
#[derive(Debug, Clone)]
pub struct SegmentMatrix {
    /// Bookable segments, in span order.
    segments: Vec<Segment>,

    /// Every probed pair, in span order.
    probes: Vec<ProbeRecord>,

    /// Whether the full route was bookable and the sweep skipped.
    fast_path: bool,

    /// Upstream calls made (cache hits excluded).
    upstream_calls: usize,
}

impl SegmentMatrix {
    /// Bookable segments, in span order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Every probed pair, in span order.
    pub fn probes(&self) -> &[ProbeRecord] {
        &self.probes
    }

    /// Number of distinct pairs probed.
    pub fn checked(&self) -> usize {
        self.probes.len()
    }

    /// Number of probed pairs that were bookable.
    pub fn bookable(&self) -> usize {
        self.segments.len()
    }

    /// Whether the direct booking made the sweep unnecessary.
    pub fn fast_path(&self) -> bool {
        self.fast_path
    }

    /// Upstream availability calls made while building the matrix.
    pub fn upstream_calls(&self) -> usize {
        self.upstream_calls
    }
}

/// Probe `route` and collect its bookable segments.
///
/// Returns after every submitted probe has completed. Failed or slow
/// probes count as not bookable and never abort the build.
pub async fn build_segment_matrix<A>(
    source: &A,
    route: &Route,
    ticket: &TicketRequest,
    cache: &ProbeCache,
    config: &PlannerConfig,
) -> SegmentMatrix
where
    A: AvailabilitySource + Sync,
{
    let calls = AtomicUsize::new(0);
    let n = route.len();

    // Routes have at least two stations.
    if let Ok(span) = Span::new(0, n - 1, n) {
        let key = ticket.probe_key(route.source(), route.destination());
        info!(
            train = %ticket.train,
            origin = %key.origin,
            destination = %key.destination,
            stations = n,
            "checking direct segment"
        );

        let result = cached_probe(source, cache, key.clone(), config, &calls).await;

        if let Some(segment) = Segment::from_probe(route, span, &result) {
            info!(status = %result.status, "direct segment bookable, skipping sweep");
            return SegmentMatrix {
                segments: vec![segment],
                probes: vec![record(span, &key, result)],
                fast_path: true,
                upstream_calls: calls.load(Ordering::SeqCst),
            };
        }
    }

    let pairs = probe_keys(route, ticket);

    info!(
        pairs = pairs.len(),
        concurrency = config.concurrency(),
        "direct segment unavailable, sweeping all segments"
    );

    // Join point: nothing below runs until every probe has returned.
    stream::iter(pairs.iter().cloned())
        .map(|(_, key)| cached_probe(source, cache, key, config, &calls))
        .buffer_unordered(config.concurrency())
        .collect::<Vec<ProbeResult>>()
        .await;

    let mut segments = Vec::new();
    let mut probes = Vec::with_capacity(pairs.len());

    for (span, key) in pairs {
        let Some(result) = cache.get(&key).await else {
            continue;
        };
        if let Some(segment) = Segment::from_probe(route, span, &result) {
            segments.push(segment);
        }
        probes.push(record(span, &key, result));
    }

    let upstream_calls = calls.load(Ordering::SeqCst);

    info!(
        checked = probes.len(),
        bookable = segments.len(),
        upstream_calls,
        "segment sweep complete"
    );

    SegmentMatrix {
        segments,
        probes,
        fast_path: false,
        upstream_calls,
    }
}

/// Every (span, key) pair of the route, in span order.
fn probe_keys(route: &Route, ticket: &TicketRequest) -> Vec<(Span, ProbeKey)> {
    Span::all(route.len())
        .filter_map(|span| {
            let origin = route.station(span.start())?;
            let destination = route.station(span.end())?;
            Some((span, ticket.probe_key(origin, destination)))
        })
        .collect()
}

/// Probe through the cache, counting calls that actually go upstream.
async fn cached_probe<A>(
    source: &A,
    cache: &ProbeCache,
    key: ProbeKey,
    config: &PlannerConfig,
    calls: &AtomicUsize,
) -> ProbeResult
where
    A: AvailabilitySource + Sync,
{
    let probe_key = key.clone();
    cache
        .get_or_compute(key, async move {
            calls.fetch_add(1, Ordering::SeqCst);
            probe(source, &probe_key, config.probe_timeout).await
        })
        .await
}

fn record(span: Span, key: &ProbeKey, result: ProbeResult) -> ProbeRecord {
    ProbeRecord {
        span,
        origin: key.origin,
        destination: key.destination,
        result,
    }
}
