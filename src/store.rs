//! Main store entry point for ArrayStore.
//!
//! This module provides the `ArrayStore` struct and its builder.
//!
//! # Example
//!
//! ```
//! use arraystore::prelude::*;
//!
//! let mut db = ArrayStore::new();
//!
//! assert!(db.add("a", 1));
//! assert!(!db.add("a", 2));
//! assert_eq!(db.get("a"), Some(&Value::Int(1)));
//!
//! assert!(db.replace("a", 2));
//! assert!(db.delete("a"));
//! assert!(!db.exists("a"));
//!
//! let id = db.store("anonymous").unwrap();
//! assert_eq!(db.get(&id.to_string()), Some(&Value::from("anonymous")));
//! ```

use crate::error::{Error, Result};
use crate::shared::SharedArrayStore;
use arraystore_core::{IdFormat, IdGenerator, Identifier, RandomIdGenerator, Storage, Value};
use arraystore_storage::MemoryStore;
use std::fmt;
use tracing::{debug, trace, trace_span, warn};

/// Largest `initial_capacity` the builder accepts.
///
/// The hint is allocated eagerly, and a failed allocation aborts the process
/// instead of returning an error. Hints above this bound are rejected by
/// [`ArrayStoreBuilder::build`] so the failure stays recoverable.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 28;

/// The ArrayStore key-value store.
///
/// A non-persistent mapping from string keys to [`Value`]s. Writes take
/// `&mut self`; share across threads with [`SharedArrayStore`].
///
/// Precondition failures are reported as `false` (or `None` for
/// [`store`](Self::store)) and leave the store unchanged. The `try_*`
/// variants report the same outcomes as typed errors.
pub struct ArrayStore {
    data: MemoryStore<Value>,
    ids: Box<dyn IdGenerator>,
    id_format: IdFormat,
}

impl ArrayStore {
    /// Create an empty store with default settings.
    ///
    /// Identifiers are random and hyphenated.
    pub fn new() -> Self {
        Self {
            data: MemoryStore::new(),
            ids: Box::new(RandomIdGenerator),
            id_format: IdFormat::default(),
        }
    }

    /// Create a builder for store configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use arraystore::prelude::*;
    ///
    /// let db = ArrayStore::builder()
    ///     .initial_capacity(1024)
    ///     .compact_ids()
    ///     .build()?;
    /// assert_eq!(db.id_format(), IdFormat::Compact);
    /// # Ok::<(), arraystore::Error>(())
    /// ```
    pub fn builder() -> ArrayStoreBuilder {
        ArrayStoreBuilder::new()
    }

    /// Layout of identifiers produced by [`store`](Self::store).
    pub fn id_format(&self) -> IdFormat {
        self.id_format
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> bool {
        self.data.exists(key)
    }

    /// Get a value.
    ///
    /// Returns `None` if the key doesn't exist. A stored [`Value::Null`]
    /// comes back as `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get an owned copy of a value.
    pub fn get_cloned(&self, key: &str) -> Option<Value> {
        self.data.get(key).cloned()
    }

    /// Get multiple values.
    ///
    /// Returns values in the same order as keys. Missing keys return `None`.
    pub fn get_many(&self, keys: &[&str]) -> Vec<Option<&Value>> {
        self.data.get_many(keys)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over keys (unspecified order).
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys()
    }

    /// Iterate over entries (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.data.iter()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a value only if the key is absent.
    ///
    /// Returns `false`, leaving the existing value in place, if the key
    /// already exists.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let _span = trace_span!("add", key = %key).entered();
        let added = self.data.add(key, value.into());
        if !added {
            debug!("add refused: key exists");
        }
        added
    }

    /// Insert or overwrite a value. Always returns `true`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        trace!(key = %key, "set");
        self.data.set(key, value.into())
    }

    /// Overwrite a value only if the key exists.
    ///
    /// Returns `false` without inserting if the key is absent.
    pub fn replace(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let _span = trace_span!("replace", key = %key).entered();
        let replaced = self.data.replace(key, value.into());
        if !replaced {
            debug!("replace refused: key absent");
        }
        replaced
    }

    /// Delete a key.
    ///
    /// Returns `true` if the key existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let deleted = self.data.delete(key);
        if !deleted {
            debug!(key = %key, "delete refused: key absent");
        }
        deleted
    }

    /// Delete a key and return the value it held.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        let removed = self.data.take(key);
        if removed.is_none() {
            debug!(key = %key, "delete refused: key absent");
        } else {
            trace!(key = %key, "delete");
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Generate a fresh identifier without touching the store.
    ///
    /// The generator's output is treated as random bits: the version nibble
    /// and variant bits are forced, so the result is always a valid v4 UUID.
    pub fn generate_identifier(&self) -> Identifier {
        Identifier::from_random_bytes(self.ids.generate().into_bytes(), self.id_format)
    }

    /// Store a value under a freshly generated identifier.
    ///
    /// Draws exactly one identifier. If it is already a key, returns `None`
    /// and leaves the store unchanged; there is no retry.
    pub fn store(&mut self, value: impl Into<Value>) -> Option<Identifier> {
        self.try_store(value).ok()
    }

    // =========================================================================
    // Strict variants
    // =========================================================================

    /// [`add`](Self::add), reporting an existing key as an error.
    pub fn try_add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.add(key.clone(), value) {
            Ok(())
        } else {
            Err(arraystore_core::Error::KeyExists(key).into())
        }
    }

    /// [`replace`](Self::replace), reporting a missing key as an error.
    pub fn try_replace(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        if self.replace(key.clone(), value) {
            Ok(())
        } else {
            Err(arraystore_core::Error::KeyNotFound(key).into())
        }
    }

    /// [`take`](Self::take), reporting a missing key as an error.
    pub fn try_delete(&mut self, key: &str) -> Result<Value> {
        self.take(key)
            .ok_or_else(|| arraystore_core::Error::KeyNotFound(key.to_string()).into())
    }

    /// [`store`](Self::store), reporting a collision as an error.
    ///
    /// The error carries the colliding identifier. [`Error::is_retryable`]
    /// is `true` for it.
    pub fn try_store(&mut self, value: impl Into<Value>) -> Result<Identifier> {
        let id = self.generate_identifier();
        let _span = trace_span!("store", id = %id).entered();
        if !self.data.add(id.to_string(), value.into()) {
            warn!("store refused: identifier collision");
            return Err(arraystore_core::Error::IdentifierCollision(id.to_string()).into());
        }
        Ok(id)
    }
}

impl Default for ArrayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArrayStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayStore")
            .field("entries", &self.data.len())
            .field("id_format", &self.id_format)
            .finish_non_exhaustive()
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```
/// use arraystore::prelude::*;
///
/// // Pre-sized, compact 32-character identifiers
/// let db = ArrayStore::builder()
///     .initial_capacity(10_000)
///     .id_format(IdFormat::Compact)
///     .build()?;
///
/// // Thread-safe handle
/// let shared = ArrayStore::builder().build_shared()?;
/// # Ok::<(), arraystore::Error>(())
/// ```
pub struct ArrayStoreBuilder {
    capacity: usize,
    id_format: IdFormat,
    ids: Option<Box<dyn IdGenerator>>,
}

impl ArrayStoreBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            id_format: IdFormat::default(),
            ids: None,
        }
    }

    /// Pre-allocate room for `capacity` entries.
    ///
    /// This is an allocation hint, not a limit: the store grows past it as
    /// needed. Only the hint itself is bounded, by [`MAX_INITIAL_CAPACITY`].
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the identifier text layout.
    pub fn id_format(mut self, format: IdFormat) -> Self {
        self.id_format = format;
        self
    }

    /// Use 32-character identifiers without hyphens.
    pub fn compact_ids(self) -> Self {
        self.id_format(IdFormat::Compact)
    }

    /// Replace the random identifier source.
    pub fn id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Box::new(generator));
        self
    }

    /// Build the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the initial capacity
    /// exceeds [`MAX_INITIAL_CAPACITY`].
    pub fn build(self) -> Result<ArrayStore> {
        if self.capacity > MAX_INITIAL_CAPACITY {
            return Err(Error::from(arraystore_core::Error::InvalidConfig(format!(
                "initial capacity {} exceeds {}",
                self.capacity, MAX_INITIAL_CAPACITY
            ))));
        }
        debug!(
            capacity = self.capacity,
            id_format = ?self.id_format,
            "building store"
        );
        Ok(ArrayStore {
            data: MemoryStore::with_capacity(self.capacity),
            ids: self.ids.unwrap_or_else(|| Box::new(RandomIdGenerator)),
            id_format: self.id_format,
        })
    }

    /// Build the store behind a thread-safe handle.
    pub fn build_shared(self) -> Result<SharedArrayStore> {
        self.build().map(SharedArrayStore::new)
    }
}

impl Default for ArrayStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arraystore_core::Uuid;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Generator that always yields the same v4 UUID
    struct FixedIdGenerator(Uuid);

    impl IdGenerator for FixedIdGenerator {
        fn generate(&self) -> Uuid {
            self.0
        }
    }

    const FIXED: &str = "123e4567-e89b-42d3-a456-426614174000";

    fn fixed_store() -> ArrayStore {
        ArrayStore::builder()
            .id_generator(FixedIdGenerator(Uuid::parse_str(FIXED).unwrap()))
            .build()
            .unwrap()
    }

    mod kv_tests {
        use super::*;

        #[test]
        fn test_end_to_end_scenario() {
            let mut db = ArrayStore::new();
            assert!(db.add("a", 1));
            assert!(!db.add("a", 2));
            assert_eq!(db.get("a"), Some(&Value::Int(1)));
            assert!(db.replace("a", 2));
            assert_eq!(db.get("a"), Some(&Value::Int(2)));
            assert!(db.delete("a"));
            assert!(!db.exists("a"));
        }

        #[test]
        fn test_missing_key() {
            let db = ArrayStore::new();
            assert!(!db.exists("nope"));
            assert_eq!(db.get("nope"), None);
            assert_eq!(db.get_cloned("nope"), None);
        }

        #[test]
        fn test_null_is_not_absence() {
            let mut db = ArrayStore::new();
            assert!(db.set("n", Value::Null));
            assert!(db.exists("n"));
            assert_eq!(db.get("n"), Some(&Value::Null));
            assert!(!db.add("n", 1));
        }

        #[test]
        fn test_set_always_true() {
            let mut db = ArrayStore::new();
            assert!(db.set("k", "v1"));
            assert!(db.set("k", "v2"));
            assert_eq!(db.get("k"), Some(&Value::from("v2")));
        }

        #[test]
        fn test_replace_absent_does_not_insert() {
            let mut db = ArrayStore::new();
            assert!(!db.replace("k", 1));
            assert!(!db.exists("k"));
            assert!(db.is_empty());
        }

        #[test]
        fn test_delete_twice() {
            let mut db = ArrayStore::new();
            db.set("k", 1);
            assert!(db.delete("k"));
            assert!(!db.delete("k"));
            assert_eq!(db.len(), 0);
        }

        #[test]
        fn test_get_many_and_keys() {
            let mut db = ArrayStore::new();
            db.set("a", 1);
            db.set("b", 2);
            let got = db.get_many(&["b", "x", "a"]);
            assert_eq!(got, vec![Some(&Value::Int(2)), None, Some(&Value::Int(1))]);

            let mut keys: Vec<&str> = db.keys().collect();
            keys.sort_unstable();
            assert_eq!(keys, vec!["a", "b"]);
            assert_eq!(db.iter().count(), 2);

            db.clear();
            assert!(db.is_empty());
        }

        #[test]
        fn test_take() {
            let mut db = ArrayStore::new();
            db.set("k", "v");
            assert_eq!(db.take("k"), Some(Value::from("v")));
            assert_eq!(db.take("k"), None);
        }
    }

    mod storage_agreement_tests {
        use super::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Add(&'static str, i64),
            Set(&'static str, i64),
            Replace(&'static str, i64),
            Delete(&'static str),
        }

        #[test]
        fn test_writes_match_storage_defaults() {
            use Op::*;
            let ops = [
                Replace("a", 1),
                Add("a", 1),
                Add("a", 2),
                Replace("a", 3),
                Delete("b"),
                Set("b", 4),
                Add("b", 5),
                Delete("a"),
                Delete("a"),
                Replace("a", 6),
                Add("a", 7),
            ];

            let mut db = ArrayStore::new();
            let mut model: MemoryStore<Value> = MemoryStore::new();
            for op in ops {
                let (got, want) = match op {
                    Add(k, v) => (db.add(k, v), model.add(k.to_string(), Value::Int(v))),
                    Set(k, v) => (db.set(k, v), model.set(k.to_string(), Value::Int(v))),
                    Replace(k, v) => (
                        db.replace(k, v),
                        model.replace(k.to_string(), Value::Int(v)),
                    ),
                    Delete(k) => (db.delete(k), model.delete(k)),
                };
                assert_eq!(got, want, "{:?}", op);
                for key in ["a", "b"] {
                    assert_eq!(db.get(key), model.get(key), "{:?} then get {}", op, key);
                }
            }
            assert_eq!(db.get("a"), Some(&Value::Int(7)));
            assert_eq!(db.get("b"), Some(&Value::Int(4)));
        }
    }

    mod identifier_tests {
        use super::*;

        #[test]
        fn test_store_roundtrip() {
            let mut db = ArrayStore::new();
            let id = db.store(vec![Value::Int(1), Value::Int(2)]).unwrap();
            let key = id.to_string();
            assert_eq!(key.len(), 36);
            assert_eq!(
                db.get(&key),
                Some(&Value::Array(vec![Value::Int(1), Value::Int(2)]))
            );
            assert!(Identifier::parse(&key).is_ok());
        }

        #[test]
        fn test_store_compact() {
            let mut db = ArrayStore::builder().compact_ids().build().unwrap();
            let id = db.store(true).unwrap();
            let key = id.to_string();
            assert_eq!(key.len(), 32);
            assert!(db.exists(&key));
        }

        #[test]
        fn test_generate_identifier_does_not_touch_store() {
            let db = ArrayStore::new();
            let id = db.generate_identifier();
            assert_eq!(id.uuid().get_version_num(), 4);
            assert!(db.is_empty());
        }

        #[test]
        fn test_store_collision_no_retry() {
            let mut db = fixed_store();
            let first = db.store("first").unwrap();
            assert_eq!(first.to_string(), FIXED);

            assert_eq!(db.store("second"), None);
            assert_eq!(db.get(FIXED), Some(&Value::from("first")));
            assert_eq!(db.len(), 1);
        }

        #[test]
        fn test_try_store_collision_is_retryable() {
            let mut db = fixed_store();
            db.try_store(1).unwrap();
            let err = db.try_store(2).unwrap_err();
            assert_eq!(err, Error::Collision(FIXED.to_string()));
            assert!(err.is_retryable());
        }

        #[test]
        fn test_custom_generator_sequence() {
            struct Counting(AtomicU64);
            impl IdGenerator for Counting {
                fn generate(&self) -> Uuid {
                    Uuid::from_u128(u128::from(self.0.fetch_add(1, Ordering::Relaxed)))
                }
            }

            let mut db = ArrayStore::builder()
                .id_generator(Counting(AtomicU64::new(0)))
                .build()
                .unwrap();
            let a = db.store(1).unwrap();
            let b = db.store(2).unwrap();
            assert_ne!(a, b);
            assert_eq!(db.len(), 2);
            assert_eq!(a.to_string(), "00000000-0000-4000-8000-000000000000");
            assert_eq!(b.to_string(), "00000000-0000-4000-8000-000000000001");
        }

        #[test]
        fn test_nil_generator_yields_valid_v4() {
            let mut db = ArrayStore::builder()
                .id_generator(FixedIdGenerator(Uuid::nil()))
                .build()
                .unwrap();

            let generated = db.generate_identifier();
            assert_eq!(generated.uuid().get_version_num(), 4);
            assert_eq!(generated.uuid().get_variant(), uuid::Variant::RFC4122);

            let id = db.store("x").unwrap();
            let key = id.to_string();
            assert_eq!(key, "00000000-0000-4000-8000-000000000000");
            assert_eq!(Identifier::parse(&key).unwrap(), id);
            assert_eq!(db.get(&key), Some(&Value::from("x")));
        }

        #[test]
        fn test_valid_v4_generator_output_is_kept() {
            let db = fixed_store();
            assert_eq!(db.generate_identifier().to_string(), FIXED);
        }
    }

    mod strict_tests {
        use super::*;

        #[test]
        fn test_try_add() {
            let mut db = ArrayStore::new();
            assert!(db.try_add("k", 1).is_ok());
            let err = db.try_add("k", 2).unwrap_err();
            assert_eq!(err, Error::AlreadyExists("k".into()));
            assert_eq!(db.get("k"), Some(&Value::Int(1)));
        }

        #[test]
        fn test_try_replace() {
            let mut db = ArrayStore::new();
            assert!(db.try_replace("k", 1).unwrap_err().is_not_found());
            db.set("k", 1);
            db.try_replace("k", 2).unwrap();
            assert_eq!(db.get("k"), Some(&Value::Int(2)));
        }

        #[test]
        fn test_try_delete() {
            let mut db = ArrayStore::new();
            db.set("k", "v");
            assert_eq!(db.try_delete("k").unwrap(), Value::from("v"));
            assert!(db.try_delete("k").unwrap_err().is_not_found());
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let db = ArrayStoreBuilder::default().build().unwrap();
            assert_eq!(db.id_format(), IdFormat::Hyphenated);
            assert!(db.is_empty());
        }

        #[test]
        fn test_capacity_limit() {
            let err = ArrayStore::builder()
                .initial_capacity(MAX_INITIAL_CAPACITY + 1)
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::ConstraintViolation(_)));

            let err = ArrayStore::builder()
                .initial_capacity(usize::MAX)
                .build_shared()
                .unwrap_err();
            assert!(matches!(err, Error::ConstraintViolation(_)));
        }

        #[test]
        fn test_capacity_is_a_hint_not_a_limit() {
            let mut db = ArrayStore::builder().initial_capacity(2).build().unwrap();
            for i in 0..100 {
                assert!(db.add(format!("k{}", i), i));
            }
            assert_eq!(db.len(), 100);
        }

        #[test]
        fn test_debug_output() {
            let mut db = ArrayStore::new();
            db.set("k", 1);
            let s = format!("{:?}", db);
            assert!(s.contains("entries: 1"));
        }
    }
}
