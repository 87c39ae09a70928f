//! Public types for the ArrayStore API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Core value type
pub use arraystore_core::Value;

// Identifiers
pub use arraystore_core::{IdFormat, IdGenerator, Identifier, RandomIdGenerator, Uuid};

// Backend contract, for code generic over containers
pub use arraystore_core::Storage;
pub use arraystore_storage::MemoryStore;

/// Parse identifier text in either layout.
///
/// Thin wrapper over [`Identifier::parse`] returning the public error type.
pub fn parse_identifier(text: &str) -> crate::Result<Identifier> {
    Ok(Identifier::parse(text)?)
}

/// Parse JSON text into a [`Value`].
pub fn value_from_json(text: &str) -> crate::Result<Value> {
    Ok(Value::from_json_str(text)?)
}
