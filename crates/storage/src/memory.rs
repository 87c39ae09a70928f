//! In-memory associative container
//!
//! # Design
//!
//! - FxHashMap: O(1) lookups, fast non-crypto hash
//! - Owned `String` keys, generic values
//! - No ordering guarantee for `keys()` / `iter()`
//!
//! Conditional writes (`add`, `replace`) come from the `Storage` trait's
//! default methods, so they share one definition across backends.

use arraystore_core::Storage;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Non-persistent key-value container
///
/// # Example
///
/// ```
/// use arraystore_core::Storage;
/// use arraystore_storage::MemoryStore;
///
/// let mut store = MemoryStore::new();
/// assert!(store.add("a".to_string(), 1));
/// assert!(!store.add("a".to_string(), 2));
/// assert_eq!(store.get("a"), Some(&1));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore<V> {
    data: FxHashMap<String, V>,
}

impl<V> MemoryStore<V> {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }

    /// Create a store with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of entries the map can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Iterate over stored keys (unspecified order)
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    /// Iterate over stored entries (unspecified order)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Storage for MemoryStore<V> {
    type Value = V;

    #[inline]
    fn exists(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&V> {
        self.data.get(key)
    }

    #[inline]
    fn set(&mut self, key: String, value: V) -> bool {
        self.data.insert(key, value);
        true
    }

    #[inline]
    fn take(&mut self, key: &str) -> Option<V> {
        self.data.remove(key)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn clear(&mut self) {
        trace!(entries = self.data.len(), "clearing memory store");
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> String {
        s.to_string()
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_empty_store() {
            let store: MemoryStore<i32> = MemoryStore::new();
            assert!(store.is_empty());
            assert_eq!(store.len(), 0);
            assert!(!store.exists("missing"));
            assert_eq!(store.get("missing"), None);
        }

        #[test]
        fn test_set_then_get() {
            let mut store = MemoryStore::new();
            assert!(store.set(key("k"), "v"));
            assert!(store.exists("k"));
            assert_eq!(store.get("k"), Some(&"v"));
        }

        #[test]
        fn test_set_overwrites() {
            let mut store = MemoryStore::new();
            assert!(store.set(key("k"), 1));
            assert!(store.set(key("k"), 2));
            assert_eq!(store.get("k"), Some(&2));
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn test_empty_key_is_a_key() {
            let mut store = MemoryStore::new();
            assert!(store.add(key(""), 0));
            assert!(store.exists(""));
        }

        #[test]
        fn test_option_values_distinguish_absence() {
            // A stored None is present, not missing
            let mut store: MemoryStore<Option<i32>> = MemoryStore::new();
            store.set(key("null"), None);
            assert!(store.exists("null"));
            assert_eq!(store.get("null"), Some(&None));
            assert_eq!(store.get("other"), None);
        }

        #[test]
        fn test_get_many_preserves_order() {
            let mut store = MemoryStore::new();
            store.set(key("a"), 1);
            store.set(key("c"), 3);
            let got = store.get_many(&["c", "b", "a", "c"]);
            assert_eq!(got, vec![Some(&3), None, Some(&1), Some(&3)]);
        }
    }

    mod conditional_write_tests {
        use super::*;

        #[test]
        fn test_add_does_not_overwrite() {
            let mut store = MemoryStore::new();
            assert!(store.add(key("a"), 1));
            assert!(!store.add(key("a"), 2));
            assert_eq!(store.get("a"), Some(&1));
        }

        #[test]
        fn test_replace_absent_does_not_insert() {
            let mut store = MemoryStore::new();
            assert!(!store.replace(key("a"), 1));
            assert!(!store.exists("a"));
        }

        #[test]
        fn test_replace_present() {
            let mut store = MemoryStore::new();
            store.add(key("a"), 1);
            assert!(store.replace(key("a"), 2));
            assert_eq!(store.get("a"), Some(&2));
        }
    }

    mod delete_tests {
        use super::*;

        #[test]
        fn test_delete_absent() {
            let mut store: MemoryStore<i32> = MemoryStore::new();
            assert!(!store.delete("a"));
        }

        #[test]
        fn test_delete_twice() {
            let mut store = MemoryStore::new();
            store.set(key("a"), 1);
            store.set(key("b"), 2);
            assert!(store.delete("a"));
            assert!(!store.delete("a"));
            assert!(!store.exists("a"));
            assert_eq!(store.len(), 1);
            assert_eq!(store.get("b"), Some(&2));
        }

        #[test]
        fn test_take_returns_value() {
            let mut store = MemoryStore::new();
            store.set(key("a"), vec![1, 2, 3]);
            assert_eq!(store.take("a"), Some(vec![1, 2, 3]));
            assert_eq!(store.take("a"), None);
        }

        #[test]
        fn test_clear() {
            let mut store = MemoryStore::with_capacity(8);
            assert!(store.capacity() >= 8);
            store.set(key("a"), 1);
            store.set(key("b"), 2);
            store.clear();
            assert!(store.is_empty());
            assert!(!store.exists("a"));
        }
    }

    mod iteration_tests {
        use super::*;

        #[test]
        fn test_keys_and_iter() {
            let mut store = MemoryStore::new();
            store.set(key("x"), 10);
            store.set(key("y"), 20);

            let mut keys: Vec<&str> = store.keys().collect();
            keys.sort_unstable();
            assert_eq!(keys, vec!["x", "y"]);

            let total: i32 = store.iter().map(|(_, v)| *v).sum();
            assert_eq!(total, 30);
        }
    }
}
