//! Thread-safe handle over one store.
//!
//! `SharedArrayStore` wraps an [`ArrayStore`] in `Arc<RwLock<_>>`. Every
//! method takes the lock exactly once, so the check-then-write operations
//! (`add`, `replace`, `delete`, `store`) stay atomic across handles.
//! Reads return owned values because no guard outlives a call.

use crate::error::Result;
use crate::store::ArrayStore;
use arraystore_core::{Identifier, Value};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, lock-guarded reference to one [`ArrayStore`].
///
/// # Example
///
/// ```
/// use arraystore::prelude::*;
/// use std::thread;
///
/// let db = SharedArrayStore::default();
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let db = db.clone();
///         thread::spawn(move || db.add("leader", i))
///     })
///     .collect();
///
/// let winners = handles
///     .into_iter()
///     .map(|h| h.join().unwrap())
///     .filter(|won| *won)
///     .count();
/// assert_eq!(winners, 1);
/// ```
#[derive(Clone, Default)]
pub struct SharedArrayStore {
    inner: Arc<RwLock<ArrayStore>>,
}

impl SharedArrayStore {
    /// Wrap an existing store.
    pub fn new(store: ArrayStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` under one shared lock acquisition.
    ///
    /// # Deadlocks
    ///
    /// The lock is not reentrant. Inside `f`, use the `&ArrayStore` argument
    /// and do not call methods on this handle or any clone of it: a writer
    /// queued on another thread blocks the nested read.
    pub fn with_read<R>(&self, f: impl FnOnce(&ArrayStore) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under one exclusive lock acquisition.
    ///
    /// Use this for compound updates that must not interleave with other
    /// writers, such as read-modify-write.
    ///
    /// # Deadlocks
    ///
    /// The lock is not reentrant. Calling any method of this handle or a
    /// clone of it from inside `f` blocks forever; use the `&mut ArrayStore`
    /// argument instead. `{:?}` on the handle is safe and prints `<locked>`.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ArrayStore) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> bool {
        self.inner.read().exists(key)
    }

    /// Get a copy of a value.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().get_cloned(key)
    }

    /// Get copies of multiple values, in request order.
    pub fn get_many(&self, keys: &[&str]) -> Vec<Option<Value>> {
        self.inner
            .read()
            .get_many(keys)
            .into_iter()
            .map(|v| v.cloned())
            .collect()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of the current keys (unspecified order).
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys().map(str::to_string).collect()
    }

    /// See [`ArrayStore::add`].
    pub fn add(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        self.inner.write().add(key, value)
    }

    /// See [`ArrayStore::set`].
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        self.inner.write().set(key, value)
    }

    /// See [`ArrayStore::replace`].
    pub fn replace(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        self.inner.write().replace(key, value)
    }

    /// See [`ArrayStore::delete`].
    pub fn delete(&self, key: &str) -> bool {
        self.inner.write().delete(key)
    }

    /// See [`ArrayStore::take`].
    pub fn take(&self, key: &str) -> Option<Value> {
        self.inner.write().take(key)
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// See [`ArrayStore::generate_identifier`].
    pub fn generate_identifier(&self) -> Identifier {
        self.inner.read().generate_identifier()
    }

    /// See [`ArrayStore::store`].
    pub fn store(&self, value: impl Into<Value>) -> Option<Identifier> {
        self.inner.write().store(value)
    }

    /// See [`ArrayStore::try_add`].
    pub fn try_add(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.inner.write().try_add(key, value)
    }

    /// See [`ArrayStore::try_replace`].
    pub fn try_replace(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        self.inner.write().try_replace(key, value)
    }

    /// See [`ArrayStore::try_delete`].
    pub fn try_delete(&self, key: &str) -> Result<Value> {
        self.inner.write().try_delete(key)
    }

    /// See [`ArrayStore::try_store`].
    pub fn try_store(&self, value: impl Into<Value>) -> Result<Identifier> {
        self.inner.write().try_store(value)
    }
}

impl From<ArrayStore> for SharedArrayStore {
    fn from(store: ArrayStore) -> Self {
        Self::new(store)
    }
}

impl std::fmt::Debug for SharedArrayStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut t = f.debug_tuple("SharedArrayStore");
        // Never block: the caller may already hold the write lock.
        match self.inner.try_read() {
            Some(store) => t.field(&*store),
            None => t.field(&format_args!("<locked>")),
        };
        t.finish()
    }
}
