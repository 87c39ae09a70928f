//! # ArrayStore
//!
//! Non-persistent, process-local key-value store.
//!
//! One mapping from string keys to [`Value`]s, with existence-checked
//! writes and inserts keyed by random version-4 UUIDs.
//!
//! ## Quick Start
//!
//! ```
//! use arraystore::prelude::*;
//!
//! let mut db = ArrayStore::new();
//!
//! db.set("user:1", "Alice");
//! assert!(!db.add("user:1", "Bob"));        // add never overwrites
//! assert!(!db.replace("user:2", "Carol"));  // replace never creates
//!
//! let id = db.store(json!({"action": "login"})).unwrap();
//! assert!(db.exists(&id.to_string()));
//! ```
//!
//! ## Operations
//!
//! | Operation | Fails (returns `false` / `None`) when |
//! |-----------|---------------------------------------|
//! | `add` | key exists |
//! | `set` | never |
//! | `replace` | key absent |
//! | `delete` | key absent |
//! | `store` | generated identifier already in use |
//!
//! A failed operation leaves the store unchanged. `try_add`, `try_replace`,
//! `try_delete` and `try_store` return the same outcomes as [`Error`]s.
//!
//! ## Sharing
//!
//! [`ArrayStore`] is single-owner. For use from several threads, build a
//! [`SharedArrayStore`] (`ArrayStore::builder().build_shared()`).

#![warn(missing_docs)]

mod error;
mod shared;
mod store;
mod types;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use shared::SharedArrayStore;
pub use store::{ArrayStore, ArrayStoreBuilder, MAX_INITIAL_CAPACITY};

// Re-export types
pub use types::*;
