//! Short-lived cache of rendered arrivals payloads.
//!
//! A hit returns the previously rendered response bytes unchanged, so a
//! burst of requests for the same stop touches the upstream page only once
//! per TTL window. Only successful, non-empty boards are ever stored; error
//! payloads and the empty board are re-derived on every request.

use std::time::Duration;

use axum::body::Bytes;
use moka::future::Cache as MokaCache;

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached payloads.
    pub ttl: Duration,

    /// Maximum number of cached stops. Capacity pressure may evict entries
    /// before their TTL; callers must not assume permanence.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(25),
            max_capacity: 1024,
        }
    }
}

/// Rendered response payloads keyed by stop code.
///
/// Internally synchronized; concurrent writers to the same key resolve as
/// last-write-wins within the TTL.
pub struct ResponseCache {
    entries: MokaCache<String, Bytes>,
}

impl ResponseCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get the cached payload for a stop, if present and not expired.
    pub async fn get(&self, stop: &str) -> Option<Bytes> {
        self.entries.get(stop).await
    }

    /// Store a rendered payload for a stop.
    pub async fn insert(&self, stop: String, payload: Bytes) {
        self.entries.insert(stop, payload).await;
    }

    /// Approximate number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
