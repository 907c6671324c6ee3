//! The user's watched list.
//!
//! An ordered list of rated titles, unique by id, persisted as a JSON array
//! under [`WATCHED_KEY`] after every mutation. A mutation only returns `Ok`
//! once the store has accepted the new list; on a failed write the in-memory
//! list is restored to its previous state.

mod types;

pub use types::*;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::metrics;
use crate::store::{KeyValueStore, StoreError};

/// Store key holding the serialized watched list.
pub const WATCHED_KEY: &str = "watched";

/// Errors raised by watched list operations.
#[derive(Debug, Error)]
pub enum WatchedError {
    #[error("Persistence failed: {0}")]
    Store(#[from] StoreError),

    #[error("Already in watched list: {0}")]
    DuplicateEntry(String),

    #[error("Rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),
}

/// Encode entries the way they are stored.
pub fn serialize_entries(entries: &[WatchedEntry]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(entries)?)
}

/// Decode a stored list.
pub fn deserialize_entries(raw: &str) -> Result<Vec<WatchedEntry>, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

/// Persisted, ordered list of watched titles.
pub struct WatchedCollection {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<WatchedEntry>,
}

impl WatchedCollection {
    /// Load the list from `store`. A missing key yields an empty list; a
    /// value that does not decode is an error.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, WatchedError> {
        let entries = match store.get(WATCHED_KEY)? {
            Some(raw) => deserialize_entries(&raw)?,
            None => Vec::new(),
        };

        info!("Loaded watched list with {} entries", entries.len());
        Ok(Self { store, entries })
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Rating the user gave to `id`, if it is in the list.
    pub fn user_rating(&self, id: &str) -> Option<u8> {
        self.get(id).map(|e| e.user_rating)
    }

    /// Append an entry and persist.
    pub fn add(&mut self, entry: WatchedEntry) -> Result<(), WatchedError> {
        if !(MIN_USER_RATING..=MAX_USER_RATING).contains(&entry.user_rating) {
            return Err(WatchedError::InvalidRating(entry.user_rating));
        }
        if self.contains(&entry.id) {
            return Err(WatchedError::DuplicateEntry(entry.id));
        }

        let id = entry.id.clone();
        self.entries.push(entry);
        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }

        metrics::WATCHED_MUTATIONS.with_label_values(&["add"]).inc();
        info!("Added {} to watched list", id);
        Ok(())
    }

    /// Remove the entry with `id` and persist. Returns false (and writes
    /// nothing) when no such entry exists.
    pub fn remove(&mut self, id: &str) -> Result<bool, WatchedError> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        let removed = self.entries.remove(index);
        if let Err(e) = self.persist() {
            self.entries.insert(index, removed);
            return Err(e);
        }

        metrics::WATCHED_MUTATIONS.with_label_values(&["remove"]).inc();
        info!("Removed {} from watched list", id);
        Ok(true)
    }

    pub fn statistics(&self) -> WatchedStats {
        WatchedStats::compute(&self.entries)
    }

    fn persist(&self) -> Result<(), WatchedError> {
        let result = serialize_entries(&self.entries)
            .and_then(|raw| self.store.set(WATCHED_KEY, &raw));

        match result {
            Ok(()) => {
                metrics::STORE_WRITES.with_label_values(&["success"]).inc();
                Ok(())
            }
            Err(e) => {
                metrics::STORE_WRITES.with_label_values(&["error"]).inc();
                warn!("Failed to persist watched list: {}", e);
                Err(e.into())
            }
        }
    }
}
