//! Exchange Rates FX Engine
//!
//! Exchange rate lookups and currency conversion backed by a remote rates
//! provider, with results cached in a key-value store.
//!
//! # Features
//!
//! - Latest, historical and date-range rate lookups
//! - Deterministic cache keys shared across processes
//! - One-shot cache busting
//! - Same-currency lookups answered without network access
//!
//! # Example
//!
//! ```rust,ignore
//! use exchange_rates_fx::{ExchangeRate, ExchangeRateConfig};
//! use rust_decimal_macros::dec;
//!
//! let rates = ExchangeRate::from_config(ExchangeRateConfig::from_env())?;
//!
//! // Latest rate
//! let rate = rates.exchange_rate("EUR", "GBP", None)?;
//!
//! // Force a fresh fetch of a historical rate, then convert
//! let date = chrono::NaiveDate::from_ymd_opt(2019, 11, 8).unwrap();
//! let gbp = rates.bust_cache().convert(dec!(10), "EUR", "GBP", Some(date))?;
//! ```

pub mod cache;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod request;
pub mod store;
pub mod transport;
pub mod validation;

pub use cache::CacheGateway;
pub use config::{CacheConfig, CurrencySource, ExchangeRateConfig, ProviderConfig};
pub use engine::ExchangeRate;
pub use error::{FxError, FxResult, StoreError, TransportError};
pub use request::ProviderRequest;
pub use store::{KeyValueStore, MemoryStore};
pub use transport::{HttpTransport, Transport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;
