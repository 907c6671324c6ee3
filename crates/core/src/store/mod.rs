//! Durable key-value persistence.
//!
//! Values are opaque strings; callers own the encoding. The watched list is
//! stored as a JSON array under a single key.

mod sqlite;

pub use sqlite::SqliteKeyValueStore;

use thiserror::Error;

/// Errors raised by key-value stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait for string-keyed persistent storage.
///
/// Writes are synchronous: when `set` returns `Ok`, the value is durable.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
