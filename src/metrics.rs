//! Metrics Sink Module
//!
//! Collaborator contract for counter emission. The engine increments named
//! counters at well-defined points (`sets`, `hits`, `misses`, `evicted`,
//! `expired`, `metadata_queries`); hosts plug in their own sink or use one
//! of the shipped implementations.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

// == Metrics Sink Trait ==
/// Accepts named counter increments from the cache engine.
pub trait MetricsSink: Send + Sync {
    /// Increments the counter with the given name by one.
    fn increment(&self, counter: &str);
}

// == Noop Metrics ==
/// A sink that discards all increments.
#[derive(Debug, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn increment(&self, _counter: &str) {}
}

// == In-Memory Metrics ==
/// A sink that accumulates counters in memory, mainly for tests and
/// single-process hosts that expose counters through their own surface.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: Mutex<HashMap<String, u64>>,
}

impl InMemoryMetrics {
    /// Creates a new sink with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of a counter (zero if never incremented).
    pub fn get(&self, counter: &str) -> u64 {
        self.lock().get(counter).copied().unwrap_or(0)
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, u64>> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MetricsSink for InMemoryMetrics {
    fn increment(&self, counter: &str) {
        *self.lock().entry(counter.to_string()).or_insert(0) += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_metrics_discard() {
        let sink = NoopMetrics;
        sink.increment("sets");
        sink.increment("sets");
    }

    #[test]
    fn test_in_memory_metrics_counts() {
        let sink = InMemoryMetrics::new();
        assert_eq!(sink.get("hits"), 0);

        sink.increment("hits");
        sink.increment("hits");
        sink.increment("misses");

        assert_eq!(sink.get("hits"), 2);
        assert_eq!(sink.get("misses"), 1);
        assert_eq!(sink.get("evicted"), 0);
    }

    #[test]
    fn test_in_memory_metrics_snapshot() {
        let sink = InMemoryMetrics::new();
        sink.increment("sets");
        sink.increment("expired");

        let snapshot = sink.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("sets"), Some(&1));
        assert_eq!(snapshot.get("expired"), Some(&1));
    }
}
