//! Exchange rate lookups.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use exchange_rates_common::{today, weekdays_between, CacheKey, CurrencyCode, CurrencySet, RateSeries};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::cache::CacheGateway;
use crate::config::{CurrencySource, ExchangeRateConfig};
use crate::error::{FxError, FxResult};
use crate::request::{self, ProviderRequest};
use crate::store::{KeyValueStore, MemoryStore};
use crate::transport::{HttpTransport, Transport};
use crate::validation;

/// Cached exchange rate client.
///
/// Every lookup validates its input, answers same-currency queries locally,
/// then consults the cache before asking the provider. Results fetched from
/// the provider are written back to the cache.
pub struct ExchangeRate {
    transport: Arc<dyn Transport>,
    cache: CacheGateway,
    currency_source: CurrencySource,
    known_currencies: RwLock<Option<Arc<CurrencySet>>>,
    should_bust_cache: AtomicBool,
}

impl ExchangeRate {
    /// Create a client validating against the static currency list.
    pub fn new(transport: Arc<dyn Transport>, cache: CacheGateway) -> Self {
        Self {
            transport,
            cache,
            currency_source: CurrencySource::Static,
            known_currencies: RwLock::new(None),
            should_bust_cache: AtomicBool::new(false),
        }
    }

    /// Create a client over the given transport and store.
    pub fn with_config(
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
        config: ExchangeRateConfig,
    ) -> FxResult<Self> {
        config.cache.validate().map_err(FxError::Config)?;

        let mut engine = Self::new(transport, CacheGateway::with_store(store, config.cache));
        engine.currency_source = config.currency_source;
        Ok(engine)
    }

    /// Create an HTTP-backed client with an in-memory cache.
    pub fn from_config(config: ExchangeRateConfig) -> FxResult<Self> {
        config.validate().map_err(FxError::Config)?;

        let transport = Arc::new(HttpTransport::new(config.provider.clone())?);
        Self::with_config(transport, Arc::new(MemoryStore::new()), config)
    }

    /// Make the next cache lookup evict its entry instead of reading it.
    ///
    /// The flag is cleared by that lookup.
    pub fn should_bust_cache(&self, bust: bool) -> &Self {
        self.should_bust_cache.store(bust, Ordering::SeqCst);
        self
    }

    /// Shorthand for `should_bust_cache(true)`.
    pub fn bust_cache(&self) -> &Self {
        self.should_bust_cache(true)
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    /// Currencies quoted by the provider: its base currency first.
    #[instrument(skip(self))]
    pub fn currencies(&self) -> FxResult<Vec<CurrencyCode>> {
        let key = self.cache.currencies_key();

        if let Some(cached) = self.attempt_to_resolve_from_cache(&key) {
            return Ok(cached);
        }

        self.fetch_currencies(&key)
    }

    /// Rate from `from` to `to` on `date`, or the latest rate when no date
    /// is given.
    #[instrument(skip(self))]
    pub fn exchange_rate(&self, from: &str, to: &str, date: Option<NaiveDate>) -> FxResult<Decimal> {
        let (from, to) = self.validate_pair(from, to)?;
        if let Some(date) = date {
            validation::validate_date(date)?;
        }

        if from == to {
            return Ok(Decimal::ONE);
        }

        let key = self
            .cache
            .build_cache_key(from, to, date.unwrap_or_else(today), None);

        if let Some(cached) = self.attempt_to_resolve_from_cache(&key) {
            return Ok(cached);
        }

        let request = match date {
            Some(date) => ProviderRequest::Historical { base: from, date },
            None => ProviderRequest::Latest { base: from },
        };
        let body = request.send(self.transport.as_ref())?;
        let rate = request::single_rate(&body, to)?;

        self.cache.store_in_cache(&key, &rate);

        Ok(rate)
    }

    /// Rates from `from` to `to` for every day in `[date, end_date]`,
    /// ascending by date.
    ///
    /// Same-currency ranges are answered locally with one entry per weekday.
    #[instrument(skip(self))]
    pub fn exchange_rate_between_date_range(
        &self,
        from: &str,
        to: &str,
        date: NaiveDate,
        end_date: NaiveDate,
    ) -> FxResult<RateSeries> {
        let (from, to) = self.validate_pair(from, to)?;
        validation::validate_date_range(date, end_date)?;

        if from == to {
            return Ok(same_currency_series(date, end_date));
        }

        let key = self.cache.build_cache_key(from, to, date, Some(end_date));

        if let Some(cached) = self.attempt_to_resolve_from_cache(&key) {
            return Ok(cached);
        }

        let request = ProviderRequest::History {
            base: from,
            symbol: to,
            start: date,
            end: end_date,
        };
        let body = request.send(self.transport.as_ref())?;
        let series = request::rate_series(&body, to)?;

        self.cache.store_in_cache(&key, &series);

        Ok(series)
    }

    fn validate_pair(&self, from: &str, to: &str) -> FxResult<(CurrencyCode, CurrencyCode)> {
        let known = self.known_currencies()?;
        Ok((
            validation::validate_currency_code(&known, from)?,
            validation::validate_currency_code(&known, to)?,
        ))
    }

    /// The currency set lookups are validated against. Loaded once.
    fn known_currencies(&self) -> FxResult<Arc<CurrencySet>> {
        if let Some(known) = self.known_currencies.read().as_ref() {
            return Ok(known.clone());
        }

        let known = Arc::new(match self.currency_source {
            CurrencySource::Static => CurrencySet::fallback(),
            CurrencySource::Provider => {
                // Plain cache read: the bust flag belongs to the caller's lookup.
                let key = self.cache.currencies_key();
                let list = match self.cache.get_from_cache::<Vec<CurrencyCode>>(&key) {
                    Some(list) => list,
                    None => self.fetch_currencies(&key)?,
                };
                CurrencySet::new(list)
            }
        });

        debug!(count = known.len(), source = ?self.currency_source, "Loaded known currencies");
        *self.known_currencies.write() = Some(known.clone());
        Ok(known)
    }

    fn fetch_currencies(&self, key: &CacheKey) -> FxResult<Vec<CurrencyCode>> {
        let body = ProviderRequest::Currencies.send(self.transport.as_ref())?;
        let currencies = request::currency_list(&body)?;

        self.cache.store_in_cache(key, &currencies);

        Ok(currencies)
    }

    /// Read `key` from the cache, unless a bust is pending, in which case the
    /// entry is evicted and the flag cleared.
    fn attempt_to_resolve_from_cache<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if self.should_bust_cache.swap(false, Ordering::SeqCst) {
            debug!(key = %key, "Busting cache entry");
            self.cache.forget(key);
            return None;
        }

        self.cache.get_from_cache(key)
    }
}

/// One rate of exactly one per weekday in `[start, end]`.
fn same_currency_series(start: NaiveDate, end: NaiveDate) -> RateSeries {
    weekdays_between(start, end)
        .map(|date| (date, Decimal::ONE))
        .collect()
}
