//! Cache Engine Module
//!
//! The composition root: sequences rate limiting, validation, eviction,
//! mutation and metrics emission, and exposes the public operation set.
//!
//! Concurrency model: the entry store, recency tracker, memory accountant
//! and dependency index live behind one mutex and mutate as a single atomic
//! unit per operation. The rate limiter has no cross-structure invariants
//! and uses its own lighter-weight lock.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore, EntryMetadata, RateLimiter};
use crate::config::Config;
use crate::error::Result;
use crate::metrics::{MetricsSink, NoopMetrics};

// == Cache Engine ==
/// Thread-safe cache engine over a [`CacheStore`].
///
/// All operations are synchronous and non-blocking. Rate shedding is silent:
/// a gated `set` is a no-op, a gated read degrades to a miss. Callers must
/// never fail because of internal rate limiting.
pub struct CacheEngine {
    /// Store, recency order, byte accounting and dependency index
    store: Mutex<CacheStore>,
    /// Sliding-window operation gate
    limiter: Mutex<RateLimiter>,
    /// Configuration the engine was built with, reused by reset()
    config: Config,
    /// Counter sink shared with the store
    metrics: Arc<dyn MetricsSink>,
}

impl CacheEngine {
    // == Constructors ==
    /// Creates an engine with the given configuration and a no-op metrics sink.
    pub fn new(config: Config) -> Self {
        Self::with_metrics(config, Arc::new(NoopMetrics))
    }

    /// Creates an engine that emits counters to the given metrics sink.
    pub fn with_metrics(config: Config, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(
                config.max_memory_bytes,
                config.default_ttl,
                Arc::clone(&metrics),
            )),
            limiter: Mutex::new(RateLimiter::new(
                config.rate_limit_window_ms,
                config.rate_limit_max_ops,
            )),
            config,
            metrics,
        }
    }

    /// Returns the configuration the engine was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL (seconds) and owning module.
    ///
    /// Returns a validation error for malformed inputs or oversized values;
    /// silently does nothing when shed by the rate limiter.
    pub fn set(
        &self,
        key: &str,
        value: Value,
        ttl: Option<u64>,
        module: Option<&str>,
    ) -> Result<()> {
        if !self.limiter().allow() {
            debug!(key, "set shed by rate limiter");
            return Ok(());
        }
        self.store().set(key, value, ttl, module)
    }

    // == Get ==
    /// Retrieves a value by key. Absent, expired and rate-shed reads all
    /// return None; this call never fails.
    pub fn get(&self, key: &str) -> Option<Value> {
        if !self.limiter().allow() {
            debug!(key, "get shed by rate limiter");
            return None;
        }
        self.store().get(key)
    }

    // == Exists ==
    /// Reports whether a live entry exists for the key without touching
    /// access metadata or recency order. Degrades to false when shed.
    pub fn exists(&self, key: &str) -> bool {
        if !self.limiter().allow() {
            return false;
        }
        self.store().exists(key)
    }

    // == Delete ==
    /// Removes an entry, returning whether one existed. Degrades to false
    /// when shed.
    pub fn delete(&self, key: &str) -> bool {
        if !self.limiter().allow() {
            return false;
        }
        self.store().delete(key)
    }

    // == Clear ==
    /// Removes all entries. Returns the number removed. Not rate-gated.
    pub fn clear(&self) -> usize {
        self.store().clear()
    }

    // == Reset ==
    /// Reinitializes all internal state in place: entries, recency order,
    /// byte accounting, dependency index, rate limiter window and cumulative
    /// counters. The engine's identity is preserved, so other holders of the
    /// same instance are unaffected. Always succeeds.
    pub fn reset(&self) -> bool {
        let removed = {
            let mut store = self.store();
            let removed = store.len();
            *store = CacheStore::new(
                self.config.max_memory_bytes,
                self.config.default_ttl,
                Arc::clone(&self.metrics),
            );
            removed
        };
        self.limiter().reset();
        info!(removed, "cache engine reset");
        true
    }

    // == Cleanup Expired ==
    /// Sweeps all expired entries, returning the count removed. Not rate-gated.
    pub fn cleanup_expired(&self) -> usize {
        self.store().cleanup_expired()
    }

    // == Metadata ==
    /// Returns a side-effect-free metadata snapshot for a key. Not rate-gated.
    pub fn get_metadata(&self, key: &str) -> Option<EntryMetadata> {
        self.store().metadata(key)
    }

    // == Stats ==
    /// Returns a point-in-time stats snapshot, read under the same exclusion
    /// as mutators so it never observes a torn intermediate state.
    pub fn get_stats(&self) -> CacheStats {
        let rate_limited = self.limiter().rate_limited_count();
        self.store().stats(rate_limited)
    }

    // == Module Dependencies ==
    /// Returns the set of module names present in the dependency index.
    pub fn get_module_dependencies(&self) -> BTreeSet<String> {
        self.store().modules()
    }

    /// Returns the keys currently sourced from a module, sorted.
    pub fn keys_for_module(&self, module: &str) -> Vec<String> {
        self.store().keys_for_module(module)
    }

    // Lock helpers. A poisoned lock yields the inner state: cache operations
    // are best-effort and must not panic in callers.
    fn store(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn limiter(&self) -> MutexGuard<'_, RateLimiter> {
        self.limiter.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
