//! Cache Statistics Module
//!
//! Cumulative operation counters and the serializable stats snapshot
//! returned by `get_stats`.

use serde::Serialize;

// == Operation Counters ==
/// Cumulative counters maintained by the store, zeroed on reset.
#[derive(Debug, Clone, Default)]
pub(crate) struct OpCounters {
    /// Successful cache retrievals
    pub hits: u64,
    /// Retrievals of absent keys
    pub misses: u64,
    /// Entries removed by LRU eviction
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
}

impl OpCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}

// == Cache Stats ==
/// Point-in-time snapshot of cache state and cumulative counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Current number of live entries
    pub entries: usize,
    /// Aggregate estimated size of live entries in bytes
    pub memory_bytes: usize,
    /// Configured memory ceiling in bytes
    pub max_memory_bytes: usize,
    /// memory_bytes / max_memory_bytes * 100
    pub utilization_percent: f64,
    /// Default TTL in seconds applied when set() omits one
    pub default_ttl_secs: u64,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals
    pub misses: u64,
    /// Entries removed by LRU eviction
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
    /// Operations shed by the rate limiter
    pub rate_limited: u64,
    /// When the snapshot was taken (RFC 3339)
    pub captured_at: String,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
