//! Core types and traits for ArrayStore
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Unified value enum for everything the store holds
//! - Identifier: UUID v4 keys produced for anonymous inserts
//! - IdFormat / IdGenerator: textual layout and randomness source for identifiers
//! - Error: Error type hierarchy
//! - Storage: The associative-container contract implemented by backends

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod id;
pub mod traits;
pub mod value;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use id::{IdFormat, IdGenerator, Identifier, RandomIdGenerator};
pub use traits::Storage;
pub use value::Value;

// Generators return this type, so implementors need no direct `uuid` dependency
pub use uuid::Uuid;
