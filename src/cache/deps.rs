//! Dependency Index Module
//!
//! Secondary index from an owning-module name to the set of cache keys it
//! sourced. Module-lifecycle code consults it to decide which keys to
//! invalidate when a module is reloaded or retired; the index is maintained
//! incrementally and never rebuilt wholesale.

use std::collections::{BTreeSet, HashMap, HashSet};

// == Dependency Index ==
/// Maps module names to the keys currently sourced from them.
///
/// Invariant: every indexed key exists in the entry store with that module
/// as its source, and a module disappears from the index once its key set
/// becomes empty.
#[derive(Debug, Default)]
pub struct DependencyIndex {
    modules: HashMap<String, HashSet<String>>,
}

impl DependencyIndex {
    // == Constructor ==
    /// Creates a new empty dependency index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Track ==
    /// Records that `key` is sourced from `module`.
    pub fn track(&mut self, module: &str, key: &str) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(key.to_string());
    }

    // == Untrack ==
    /// Removes `key` from `module`'s set, dropping the module entry entirely
    /// once its set becomes empty.
    pub fn untrack(&mut self, module: &str, key: &str) {
        if let Some(keys) = self.modules.get_mut(module) {
            keys.remove(key);
            if keys.is_empty() {
                self.modules.remove(module);
            }
        }
    }

    // == Modules ==
    /// Returns the module names currently present in the index, sorted.
    pub fn modules(&self) -> BTreeSet<String> {
        self.modules.keys().cloned().collect()
    }

    // == Keys For ==
    /// Returns the keys sourced from a module, sorted. Empty if the module
    /// is not in the index.
    pub fn keys_for(&self, module: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .modules
            .get(module)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    // == Contains ==
    /// Checks if a module has at least one tracked key.
    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    // == Clear ==
    /// Drops the entire index.
    pub fn clear(&mut self) {
        self.modules.clear();
    }

    // == Length ==
    /// Returns the number of modules in the index.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_new() {
        let index = DependencyIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_track_and_query() {
        let mut index = DependencyIndex::new();

        index.track("auth", "session:1");
        index.track("auth", "session:2");
        index.track("billing", "invoice:7");

        assert_eq!(index.len(), 2);
        assert!(index.contains("auth"));
        assert_eq!(index.keys_for("auth"), vec!["session:1", "session:2"]);
        assert_eq!(index.keys_for("billing"), vec!["invoice:7"]);

        let modules: Vec<String> = index.modules().into_iter().collect();
        assert_eq!(modules, vec!["auth", "billing"]);
    }

    #[test]
    fn test_track_same_key_twice_is_idempotent() {
        let mut index = DependencyIndex::new();

        index.track("auth", "session:1");
        index.track("auth", "session:1");

        assert_eq!(index.keys_for("auth"), vec!["session:1"]);
    }

    #[test]
    fn test_untrack_drops_empty_module() {
        let mut index = DependencyIndex::new();

        index.track("auth", "session:1");
        index.track("auth", "session:2");

        index.untrack("auth", "session:1");
        assert!(index.contains("auth"));

        index.untrack("auth", "session:2");
        assert!(!index.contains("auth"));
        assert!(index.is_empty());
    }

    #[test]
    fn test_untrack_unknown_module_is_noop() {
        let mut index = DependencyIndex::new();

        index.track("auth", "session:1");
        index.untrack("billing", "invoice:7");

        assert_eq!(index.len(), 1);
        assert!(index.contains("auth"));
    }

    #[test]
    fn test_keys_for_unknown_module_is_empty() {
        let index = DependencyIndex::new();
        assert!(index.keys_for("nope").is_empty());
    }

    #[test]
    fn test_clear() {
        let mut index = DependencyIndex::new();

        index.track("auth", "session:1");
        index.track("billing", "invoice:7");
        index.clear();

        assert!(index.is_empty());
        assert!(index.modules().is_empty());
    }
}
