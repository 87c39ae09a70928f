//! Error types for ArrayStore
//!
//! The primary store operations report precondition failures as `false` or
//! `None`. This module covers the strict (`try_*`) variants, identifier
//! parsing, configuration and JSON conversion.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for ArrayStore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ArrayStore
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `add` refused to overwrite an existing key
    #[error("Key already exists: {0}")]
    KeyExists(String),

    /// `replace` or `delete` addressed a key that is not present
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A freshly generated identifier was already in use
    #[error("Identifier collision: {0}")]
    IdentifierCollision(String),

    /// Text that is not a version-4 UUID in either supported layout
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Builder settings that cannot produce a store
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// The key or identifier this error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::KeyExists(k) | Error::KeyNotFound(k) | Error::IdentifierCollision(k) => {
                Some(k)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
