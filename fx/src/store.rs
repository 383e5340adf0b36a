//! Key-value store abstraction and an in-memory TTL implementation.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use crate::error::StoreError;

/// External key-value store the cache gateway writes through.
///
/// Implementations may be shared between processes. Concurrent writes to the
/// same key are last-write-wins.
pub trait KeyValueStore: Send + Sync {
    /// Read a raw entry.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a raw entry, replacing any existing one. `None` keeps the entry
    /// until evicted by the store's own policy.
    fn put(&self, key: &str, value: String, ttl: Option<std::time::Duration>)
        -> Result<(), StoreError>;

    /// Remove an entry. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct StoreEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl StoreEntry {
    fn new(value: String, ttl: Option<std::time::Duration>) -> Self {
        let expires_at = ttl
            .and_then(|ttl| Duration::from_std(ttl).ok())
            .map(|ttl| Utc::now() + ttl);
        Self { value, expires_at }
    }

    fn is_valid(&self) -> bool {
        self.expires_at.map_or(true, |expires_at| Utc::now() < expires_at)
    }
}

/// Thread-safe in-process store with per-entry TTL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoreEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.is_valid())
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Evict expired entries.
    pub fn evict_expired(&self) {
        self.entries.retain(|_, entry| entry.is_valid());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_valid() {
                return Ok(Some(entry.value.clone()));
            }
            debug!(key, "Store entry expired");
            drop(entry);
            self.entries.remove(key);
        }
        Ok(None)
    }

    fn put(
        &self,
        key: &str,
        value: String,
        ttl: Option<std::time::Duration>,
    ) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), StoreEntry::new(value, ttl));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
