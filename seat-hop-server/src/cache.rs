//! Memo table for availability probes.
//!
//! One `ProbeCache` lives for exactly one journey search. The key carries
//! every query parameter (train, stations, date, class, quota), so entries
//! can never answer a different question than the one that produced them.
//!
//! Concurrent requests for the same uncomputed key are coalesced: exactly
//! one of them runs the probe and the others wait for its result. Reads of
//! already-resolved keys don't wait on anything.

use std::future::Future;

use moka::future::Cache as MokaCache;

use crate::domain::{ProbeKey, ProbeResult};

/// Probe results of one journey search, keyed by query.
pub struct ProbeCache {
    /// Resolved probes. Unbounded and without expiry: a search touches at
    /// most n·(n-1)/2 keys and the cache is dropped with the search.
    entries: MokaCache<ProbeKey, ProbeResult>,
}

impl ProbeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    /// Return the cached result for `key`, running `compute` if there is
    /// none yet.
    ///
    /// `compute` runs at most once per key for the lifetime of the cache,
    /// even when several callers ask for the same key at the same time.
    pub async fn get_or_compute<F>(&self, key: ProbeKey, compute: F) -> ProbeResult
    where
        F: Future<Output = ProbeResult>,
    {
        self.entries.get_with(key, compute).await
    }

    /// Get a cached result.
    pub async fn get(&self, key: &ProbeKey) -> Option<ProbeResult> {
        self.entries.get(key).await
    }

    /// Whether a result is cached for `key`.
    pub fn contains(&self, key: &ProbeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of resolved keys.
    pub fn len(&self) -> usize {
        self.entries.iter().count()
    }

    /// Check if nothing has been probed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every resolved key and its result.
    pub fn entries(&self) -> Vec<(ProbeKey, ProbeResult)> {
        self.entries
            .iter()
            .map(|(key, result)| ((*key).clone(), result))
            .collect()
    }
}

impl Default for ProbeCache {
    fn default() -> Self {
        Self::new()
    }
}
