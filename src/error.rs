//! Unified error types for ArrayStore.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users. Only the strict
//! (`try_*`) operations, identifier parsing and the builder return it;
//! the primary store operations report failure as `false` / `None`.

use thiserror::Error;

/// All ArrayStore errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Key not present (`replace`, `delete`)
    #[error("not found: {0}")]
    NotFound(String),

    /// Key already present (`add`)
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Generated identifier was already in use (`store`)
    #[error("identifier collision: {0}")]
    Collision(String),

    /// Malformed input, such as identifier text
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Constraint violation (builder limits)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for ArrayStore operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is retryable.
    ///
    /// Only an identifier collision can succeed on a second attempt, because
    /// the retry draws a fresh identifier.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Collision(_))
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a conflict with existing data.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::AlreadyExists(_) | Error::Collision(_))
    }
}

// Convert from internal core errors
impl From<arraystore_core::Error> for Error {
    fn from(e: arraystore_core::Error) -> Self {
        use arraystore_core::Error as CoreError;
        match e {
            CoreError::KeyExists(key) => Error::AlreadyExists(key),
            CoreError::KeyNotFound(key) => Error::NotFound(key),
            CoreError::IdentifierCollision(id) => Error::Collision(id),
            CoreError::InvalidIdentifier(text) => {
                Error::InvalidInput(format!("identifier {:?}", text))
            }
            CoreError::InvalidConfig(msg) => Error::ConstraintViolation(msg),
            CoreError::Serialization(msg) => Error::Serialization(msg),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
