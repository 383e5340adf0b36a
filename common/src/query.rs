//! Rate queries, their cache keys and results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::currency::CurrencyCode;
use crate::time::format_date;

/// Rates keyed by calendar day. Iteration is always ascending by date.
pub type RateSeries = BTreeMap<NaiveDate, Decimal>;

/// A single lookup: a currency pair pinned to a day or to a range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateQuery {
    /// Base currency.
    pub from: CurrencyCode,
    /// Quote currency.
    pub to: CurrencyCode,
    /// Day of the rate, or start of the range.
    pub date: NaiveDate,
    /// End of the range, inclusive.
    pub end_date: Option<NaiveDate>,
}

impl RateQuery {
    /// Query for a single day.
    pub fn on(from: CurrencyCode, to: CurrencyCode, date: NaiveDate) -> Self {
        Self {
            from,
            to,
            date,
            end_date: None,
        }
    }

    /// Query for every day in `[start, end]`.
    pub fn between(from: CurrencyCode, to: CurrencyCode, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            from,
            to,
            date: start,
            end_date: Some(end),
        }
    }

    /// Derive the cache key under `prefix`.
    pub fn cache_key(&self, prefix: &str) -> CacheKey {
        let mut key = format!(
            "{}_{}_{}_{}",
            prefix,
            self.from,
            self.to,
            format_date(self.date)
        );
        if let Some(end) = self.end_date {
            key.push('_');
            key.push_str(&format_date(end));
        }
        CacheKey(key)
    }
}

/// Deterministic cache key. Identical across processes for identical queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Suffix of the key holding the provider's currency list.
    pub const CURRENCIES: &'static str = "currencies";

    /// Key for the provider's currency list.
    pub fn currencies(prefix: &str) -> Self {
        Self(format!("{}_{}", prefix, Self::CURRENCIES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_date_key() {
        let query = RateQuery::on(CurrencyCode::eur(), CurrencyCode::gbp(), date(2019, 11, 8));
        assert_eq!(query.cache_key("xr").as_str(), "xr_EUR_GBP_2019-11-08");
    }

    #[test]
    fn test_range_key() {
        let query = RateQuery::between(
            CurrencyCode::gbp(),
            CurrencyCode::eur(),
            date(2019, 11, 4),
            date(2019, 11, 8),
        );
        assert_eq!(
            query.cache_key("xr").to_string(),
            "xr_GBP_EUR_2019-11-04_2019-11-08"
        );
    }

    #[test]
    fn test_currencies_key() {
        assert_eq!(CacheKey::currencies("xr").as_str(), "xr_currencies");
    }

    #[test]
    fn test_series_serializes_in_date_order() {
        let mut series = RateSeries::new();
        series.insert(date(2019, 11, 8), dec!(1.1606583254));
        series.insert(date(2019, 11, 4), dec!(1.1578362356));

        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(
            json,
            r#"{"2019-11-04":"1.1578362356","2019-11-08":"1.1606583254"}"#
        );

        let back: RateSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }

    fn any_code() -> impl Strategy<Value = CurrencyCode> {
        "[A-Z]{3}".prop_map(|s| CurrencyCode::parse(&s).unwrap())
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|days| date(1990, 1, 1) + chrono::Duration::days(days))
    }

    proptest! {
        #[test]
        fn prop_keys_distinguish_queries(
            a in (any_code(), any_code(), any_date(), proptest::option::of(any_date())),
            b in (any_code(), any_code(), any_date(), proptest::option::of(any_date())),
        ) {
            let qa = RateQuery { from: a.0, to: a.1, date: a.2, end_date: a.3 };
            let qb = RateQuery { from: b.0, to: b.1, date: b.2, end_date: b.3 };
            prop_assert_eq!(qa == qb, qa.cache_key("xr") == qb.cache_key("xr"));
        }
    }
}
