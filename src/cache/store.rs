//! Cache Store Module
//!
//! The entry store plus its memory accountant: owns entry lifecycle, keeps
//! the recency tracker and dependency index in lockstep with the entry map,
//! and runs LRU eviction under memory pressure. All methods here are called
//! under the engine's single exclusive critical section, so the four
//! structures mutate as one atomic unit per operation.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cache::stats::OpCounters;
use crate::cache::{
    estimated_size, validate, CacheEntry, CacheStats, DependencyIndex, EntryMetadata,
    RecencyTracker,
};
use crate::error::{CacheError, Result};
use crate::metrics::MetricsSink;

/// Fraction of the ceiling that pressure relief frees before stopping.
const RELIEF_FRACTION: f64 = 0.20;

// == Cache Store ==
/// Key-value store with byte-budget LRU eviction, TTL expiry and
/// module dependency tracking.
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU order over live keys
    recency: RecencyTracker,
    /// Module name -> keys sourced from it
    deps: DependencyIndex,
    /// Aggregate estimated size of live entries
    memory_bytes: usize,
    /// Cumulative operation counters
    counters: OpCounters,
    /// Memory ceiling in bytes
    max_memory_bytes: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
    /// Counter sink for operation metrics
    metrics: Arc<dyn MetricsSink>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given memory ceiling and default TTL.
    pub fn new(max_memory_bytes: usize, default_ttl: u64, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyTracker::new(),
            deps: DependencyIndex::new(),
            memory_bytes: 0,
            counters: OpCounters::default(),
            max_memory_bytes,
            default_ttl,
            metrics,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL and owning module.
    ///
    /// Validation failures propagate before any mutation. A value whose
    /// estimated size alone exceeds the ceiling is rejected outright. If the
    /// insert would push aggregate bytes past the ceiling, LRU entries are
    /// evicted first (see `relieve_pressure`).
    pub fn set(
        &mut self,
        key: &str,
        value: Value,
        ttl: Option<u64>,
        module: Option<&str>,
    ) -> Result<()> {
        validate::validate_key(key)?;
        let ttl_secs = ttl.unwrap_or(self.default_ttl);
        validate::validate_ttl(ttl_secs)?;
        if let Some(module) = module {
            validate::validate_module(module)?;
        }

        let size = estimated_size(key, &value);
        if size > self.max_memory_bytes {
            return Err(CacheError::ValueTooLarge {
                size,
                ceiling: self.max_memory_bytes,
            });
        }

        // Overwrite releases the old footprint before the ceiling check
        let _ = self.remove_entry(key);

        if self.memory_bytes + size > self.max_memory_bytes {
            self.relieve_pressure();
        }
        // Hard cap: keep evicting until the new entry fits or nothing is left
        while self.memory_bytes + size > self.max_memory_bytes {
            if self.evict_one().is_none() {
                break;
            }
        }

        let entry = CacheEntry::new(value, ttl_secs, module.map(str::to_string), size);
        self.entries.insert(key.to_string(), entry);
        self.memory_bytes += size;
        self.recency.touch(key);
        if let Some(module) = module {
            self.deps.track(module, key);
        }

        self.metrics.increment("sets");
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key, or None if absent or expired.
    ///
    /// A live hit bumps the entry's access metadata and promotes the key to
    /// most recently used. An expired entry is removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.counters.record_miss();
                self.metrics.increment("misses");
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.counters.record_expiration();
            self.metrics.increment("expired");
            return None;
        }

        let value = {
            let entry = self.entries.get_mut(key)?;
            entry.touch();
            entry.value.clone()
        };
        self.recency.touch(key);
        self.counters.record_hit();
        self.metrics.increment("hits");
        Some(value)
    }

    // == Exists ==
    /// Reports whether a live (non-expired) entry exists for the key.
    ///
    /// Read-only: never bumps access metadata, recency order, or removes an
    /// expired-but-present entry.
    pub fn exists(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    // == Delete ==
    /// Removes an entry by key, returning whether one existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes all entries. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.recency.clear();
        self.deps.clear();
        self.memory_bytes = 0;
        removed
    }

    // == Reset ==
    /// Clears all entries and zeroes the cumulative counters. Returns the
    /// number of entries removed.
    pub fn reset(&mut self) -> usize {
        let removed = self.clear();
        self.counters = OpCounters::default();
        removed
    }

    // == Cleanup Expired ==
    /// Removes every entry whose age exceeds its TTL.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.remove_entry(&key);
            self.counters.record_expiration();
            self.metrics.increment("expired");
        }

        if count > 0 {
            debug!(removed = count, "expiry sweep removed entries");
        }
        count
    }

    // == Metadata ==
    /// Returns a side-effect-free metadata snapshot for a key, or None if it
    /// is not present. Expiry is reported via the snapshot, not enforced.
    pub fn metadata(&self, key: &str) -> Option<EntryMetadata> {
        self.metrics.increment("metadata_queries");
        self.entries.get(key).map(CacheEntry::metadata)
    }

    // == Stats ==
    /// Builds a stats snapshot. The rate-shed counter lives with the engine's
    /// rate limiter and is passed in.
    pub fn stats(&self, rate_limited: u64) -> CacheStats {
        let utilization_percent = if self.max_memory_bytes == 0 {
            0.0
        } else {
            self.memory_bytes as f64 / self.max_memory_bytes as f64 * 100.0
        };

        CacheStats {
            entries: self.entries.len(),
            memory_bytes: self.memory_bytes,
            max_memory_bytes: self.max_memory_bytes,
            utilization_percent,
            default_ttl_secs: self.default_ttl,
            hits: self.counters.hits,
            misses: self.counters.misses,
            evictions: self.counters.evictions,
            expirations: self.counters.expirations,
            rate_limited,
            captured_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    // == Module Dependencies ==
    /// Returns the module names currently present in the dependency index.
    pub fn modules(&self) -> BTreeSet<String> {
        self.deps.modules()
    }

    /// Returns the keys currently sourced from a module, sorted.
    pub fn keys_for_module(&self, module: &str) -> Vec<String> {
        self.deps.keys_for(module)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Memory Bytes ==
    /// Returns the aggregate estimated size of live entries.
    pub fn memory_bytes(&self) -> usize {
        self.memory_bytes
    }

    // == Eviction ==
    /// Evicts LRU entries until at least `RELIEF_FRACTION` of the ceiling has
    /// been freed or the store is empty. Runs when an insert would push
    /// aggregate bytes past the ceiling; freeing 20% from a full store brings
    /// utilization back to roughly 80%.
    fn relieve_pressure(&mut self) {
        let target = (self.max_memory_bytes as f64 * RELIEF_FRACTION) as usize;
        let mut freed = 0;
        while freed < target {
            match self.evict_one() {
                Some(size) => freed += size,
                None => break,
            }
        }
        if freed > 0 {
            debug!(freed, "memory pressure relief evicted entries");
        }
    }

    /// Evicts the least recently used entry with full delete bookkeeping.
    /// Returns the freed size, or None if the store is empty.
    fn evict_one(&mut self) -> Option<usize> {
        let key = self.recency.evict_oldest()?;
        let entry = self.entries.remove(&key)?;
        self.memory_bytes -= entry.size_bytes;
        if let Some(module) = entry.module.as_deref() {
            self.deps.untrack(module, &key);
        }
        self.counters.record_eviction();
        self.metrics.increment("evicted");
        Some(entry.size_bytes)
    }

    /// Shared delete bookkeeping: entry map, byte total, recency order and
    /// dependency index all updated together.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.memory_bytes -= entry.size_bytes;
        self.recency.remove(key);
        if let Some(module) = entry.module.as_deref() {
            self.deps.untrack(module, key);
        }
        Some(entry)
    }

    // == Invariant Checks ==
    /// Asserts the cross-structure invariants: byte accounting matches the
    /// live entries, the recency order tracks exactly the live key set, and
    /// the dependency index only references live entries.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let sum: usize = self.entries.values().map(|e| e.size_bytes).sum();
        assert_eq!(sum, self.memory_bytes, "byte accounting out of sync");

        assert_eq!(
            self.entries.len(),
            self.recency.len(),
            "recency order diverges from entry map"
        );
        for key in self.entries.keys() {
            assert!(self.recency.contains(key), "untracked live key {key}");
        }

        for module in self.deps.modules() {
            let keys = self.deps.keys_for(&module);
            assert!(!keys.is_empty(), "empty module {module} left in index");
            for key in keys {
                let source = self.entries.get(&key).and_then(|e| e.module.clone());
                assert_eq!(source.as_deref(), Some(module.as_str()));
            }
        }
    }
}
