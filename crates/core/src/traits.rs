//! Core storage trait
//!
//! `Storage` is the associative-container contract the facade is written
//! against. Backends supply the primitive map operations; the conditional
//! writes (`add`, `replace`) are derived from `exists` + `set` so every
//! backend agrees on their semantics.

/// Key-value container with existence-checked writes
///
/// All failure signals are plain booleans or `None`:
///
/// | Operation | Fails when |
/// |-----------|------------|
/// | `add` | key already present |
/// | `replace` | key absent |
/// | `delete` | key absent |
///
/// A failed operation never mutates the container.
pub trait Storage {
    /// Value type held by this container
    type Value;

    /// True iff `key` is present
    fn exists(&self, key: &str) -> bool;

    /// Stored value for `key`, `None` if absent
    fn get(&self, key: &str) -> Option<&Self::Value>;

    /// Insert or overwrite. Always returns `true`.
    fn set(&mut self, key: String, value: Self::Value) -> bool;

    /// Remove `key` and return its value, `None` if absent
    fn take(&mut self, key: &str) -> Option<Self::Value>;

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Remove every entry
    fn clear(&mut self);

    /// Insert only if `key` is absent
    fn add(&mut self, key: String, value: Self::Value) -> bool {
        if self.exists(&key) {
            return false;
        }
        self.set(key, value)
    }

    /// Overwrite only if `key` is present
    fn replace(&mut self, key: String, value: Self::Value) -> bool {
        if !self.exists(&key) {
            return false;
        }
        self.set(key, value)
    }

    /// Remove `key`; `false` if it was absent
    fn delete(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Look up several keys at once
    ///
    /// The result has one slot per requested key, in request order.
    fn get_many<'a>(&'a self, keys: &[&str]) -> Vec<Option<&'a Self::Value>> {
        keys.iter().map(|k| self.get(k)).collect()
    }

    /// True if nothing is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
