//! Storage layer for ArrayStore
//!
//! This crate implements the in-memory backend:
//! - MemoryStore: FxHashMap-based associative container implementing `Storage`
//!
//! There is no persistence and no locking at this layer. Callers that share
//! a store across threads wrap it themselves.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::MemoryStore;
