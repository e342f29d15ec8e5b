//! Utility modules: key/value persistence.

pub mod persistence;

pub use persistence::{FileStore, KeyValueStore, MemoryStore, StorageError};
