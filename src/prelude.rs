//! Convenient imports for ArrayStore.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use arraystore::prelude::*;
//!
//! let mut db = ArrayStore::new();
//! db.set("key", "value");
//! ```

// Main entry points
pub use crate::shared::SharedArrayStore;
pub use crate::store::{ArrayStore, ArrayStoreBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{IdFormat, IdGenerator, Identifier, Uuid, Value};

// Re-export serde_json for convenience
pub use serde_json::json;
