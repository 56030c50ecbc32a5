//! Search configuration for the seat-hop planner.

use std::time::Duration;

/// Configuration parameters for journey search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum number of availability probes in flight during the sweep.
    pub max_concurrent_probes: usize,

    /// Deadline for a single probe. A probe that misses it counts as not
    /// bookable.
    pub probe_timeout: Duration,

    /// Stop enumerating once this many paths have been collected.
    /// Dense availability on a long route has exponentially many paths.
    pub max_paths: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_concurrent_probes: usize, probe_timeout: Duration, max_paths: usize) -> Self {
        Self {
            max_concurrent_probes,
            probe_timeout,
            max_paths,
        }
    }

    /// Set the probe concurrency limit.
    pub fn with_max_concurrent_probes(mut self, n: usize) -> Self {
        self.max_concurrent_probes = n;
        self
    }

    /// Set the per-probe deadline.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the enumeration cap.
    pub fn with_max_paths(mut self, n: usize) -> Self {
        self.max_paths = n;
        self
    }

    /// Concurrency limit, never below one.
    pub(crate) fn concurrency(&self) -> usize {
        self.max_concurrent_probes.max(1)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_probes: 20,
            probe_timeout: Duration::from_secs(20),
            max_paths: 100_000,
        }
    }
}
