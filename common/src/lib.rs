//! Exchange Rates Common Types
//!
//! Shared types for the exchange rate client: currency codes and the known
//! currency set, calendar helpers, rate queries and the cache keys derived
//! from them.

pub mod currency;
pub mod error;
pub mod query;
pub mod time;

pub use currency::*;
pub use error::*;
pub use query::*;
pub use time::*;
