//! Recency Tracker Module
//!
//! Maintains a total least-recently-used order over live keys for eviction.

use std::collections::{HashMap, VecDeque};

// == Recency Tracker ==
/// Tracks access order for LRU eviction with amortized O(1) operations.
///
/// The queue holds `(stamp, key)` slots in touch order, oldest at the front.
/// Re-touching a key appends a fresh slot instead of moving the old one, so
/// the queue may carry stale slots; `stamps` maps each live key to its latest
/// stamp and is the authority on membership. Stale slots are skipped during
/// eviction and compacted once they outnumber live keys.
#[derive(Debug, Default)]
pub struct RecencyTracker {
    /// Touch-ordered slots, oldest at the front
    order: VecDeque<(u64, String)>,
    /// Latest stamp per live key
    stamps: HashMap<String, u64>,
    /// Monotonic touch counter
    next_stamp: u64,
}

impl RecencyTracker {
    // == Constructor ==
    /// Creates a new empty recency tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.stamps.insert(key.to_string(), stamp);
        self.order.push_back((stamp, key.to_string()));
        self.compact();
    }

    // == Remove ==
    /// Drops a key from the order (delete/expiry path). The stale queue slot
    /// is skipped lazily.
    pub fn remove(&mut self, key: &str) {
        self.stamps.remove(key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if no live keys remain.
    pub fn evict_oldest(&mut self) -> Option<String> {
        while let Some((stamp, key)) = self.order.pop_front() {
            if self.stamps.get(&key) == Some(&stamp) {
                self.stamps.remove(&key);
                return Some(key);
            }
        }
        None
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it, discarding
    /// any stale slots in front of it.
    pub fn peek_oldest(&mut self) -> Option<&String> {
        loop {
            let stale = match self.order.front() {
                Some((stamp, key)) => self.stamps.get(key) != Some(stamp),
                None => return None,
            };
            if stale {
                self.order.pop_front();
            } else {
                break;
            }
        }
        self.order.front().map(|(_, key)| key)
    }

    // == Clear ==
    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
        self.stamps.clear();
    }

    // == Length ==
    /// Returns the number of live tracked keys.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.stamps.contains_key(key)
    }

    // Keeps the queue within a small factor of the live key count.
    fn compact(&mut self) {
        if self.order.len() > self.stamps.len().saturating_mul(2).max(16) {
            let stamps = &self.stamps;
            self.order.retain(|(stamp, key)| stamps.get(key) == Some(stamp));
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_new() {
        let tracker = RecencyTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.len(), 0);
    }

    #[test]
    fn test_touch_new_keys() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.touch("key2");
        tracker.touch("key3");

        assert_eq!(tracker.len(), 3);
        // key1 is oldest (touched first)
        assert_eq!(tracker.peek_oldest(), Some(&"key1".to_string()));
    }

    #[test]
    fn test_touch_existing_key_promotes() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.touch("key2");
        tracker.touch("key3");

        // Touch key1 again - key2 becomes oldest
        tracker.touch("key1");

        assert_eq!(tracker.len(), 3);
        assert_eq!(tracker.peek_oldest(), Some(&"key2".to_string()));
    }

    #[test]
    fn test_evict_oldest_order() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.touch("key2");
        tracker.touch("key3");

        assert_eq!(tracker.evict_oldest(), Some("key1".to_string()));
        assert_eq!(tracker.evict_oldest(), Some("key2".to_string()));
        assert_eq!(tracker.evict_oldest(), Some("key3".to_string()));
        assert_eq!(tracker.evict_oldest(), None);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_evict_skips_removed_keys() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.touch("key2");
        tracker.touch("key3");

        tracker.remove("key1");

        assert_eq!(tracker.len(), 2);
        assert!(!tracker.contains("key1"));
        assert_eq!(tracker.evict_oldest(), Some("key2".to_string()));
    }

    #[test]
    fn test_evict_skips_stale_slots_after_retouch() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("a");
        tracker.touch("b");
        tracker.touch("c");

        // Re-touching everything reverses the eviction order
        tracker.touch("a");
        tracker.touch("c");
        tracker.touch("b");

        assert_eq!(tracker.evict_oldest(), Some("a".to_string()));
        assert_eq!(tracker.evict_oldest(), Some("c".to_string()));
        assert_eq!(tracker.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_remove_nonexistent_key() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.remove("nonexistent");

        assert_eq!(tracker.len(), 1);
        assert!(tracker.contains("key1"));
    }

    #[test]
    fn test_touch_same_key_many_times() {
        let mut tracker = RecencyTracker::new();

        for _ in 0..100 {
            tracker.touch("key1");
        }

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.evict_oldest(), Some("key1".to_string()));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_compaction_bounds_queue_growth() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("a");
        tracker.touch("b");
        // Many re-touches should not grow the queue without bound
        for _ in 0..10_000 {
            tracker.touch("a");
            tracker.touch("b");
        }

        assert_eq!(tracker.len(), 2);
        assert!(tracker.order.len() <= 20);
        // Last touches were a then b, so a is evicted first
        assert_eq!(tracker.evict_oldest(), Some("a".to_string()));
        assert_eq!(tracker.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_clear() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.touch("key2");
        tracker.clear();

        assert!(tracker.is_empty());
        assert_eq!(tracker.evict_oldest(), None);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut tracker = RecencyTracker::new();

        tracker.touch("key1");
        tracker.touch("key2");

        assert_eq!(tracker.peek_oldest(), Some(&"key1".to_string()));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.evict_oldest(), Some("key1".to_string()));
    }
}
