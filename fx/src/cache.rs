//! Cache gateway over an external key-value store.

use chrono::NaiveDate;
use exchange_rates_common::{CacheKey, CurrencyCode, RateQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::store::{KeyValueStore, MemoryStore};

/// Typed, best-effort access to cached rates.
///
/// Reads never fail: a store error or an entry that does not decode is
/// reported as a miss so lookups fall through to the provider.
pub struct CacheGateway {
    store: Arc<dyn KeyValueStore>,
    config: CacheConfig,
}

impl CacheGateway {
    /// Create a gateway backed by a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), CacheConfig::default())
    }

    /// Create a gateway over the given store.
    pub fn with_store(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Key for a single day, or for a range when `end_date` is given.
    pub fn build_cache_key(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> CacheKey {
        RateQuery {
            from,
            to,
            date,
            end_date,
        }
        .cache_key(&self.config.key_prefix)
    }

    /// Key for the provider's currency list.
    pub fn currencies_key(&self) -> CacheKey {
        CacheKey::currencies(&self.config.key_prefix)
    }

    /// Get a cached value, if present and decodable.
    pub fn get_from_cache<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let raw = match self.store.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cached entry is undecodable, treating as miss");
                None
            }
        }
    }

    /// Store a value, replacing any existing entry.
    pub fn store_in_cache<T: Serialize>(&self, key: &CacheKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to encode cache entry");
                return;
            }
        };

        match self.store.put(key.as_str(), raw, self.config.ttl) {
            Ok(()) => debug!(key = %key, "Stored in cache"),
            Err(e) => warn!(key = %key, error = %e, "Cache write failed"),
        }
    }

    /// Remove an entry if present.
    pub fn forget(&self, key: &CacheKey) {
        match self.store.delete(key.as_str()) {
            Ok(()) => debug!(key = %key, "Cache entry forgotten"),
            Err(e) => warn!(key = %key, error = %e, "Cache delete failed"),
        }
    }
}

impl Default for CacheGateway {
    fn default() -> Self {
        Self::new()
    }
}
