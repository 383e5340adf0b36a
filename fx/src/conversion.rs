//! Amount conversion on top of rate lookups.

use chrono::NaiveDate;
use exchange_rates_common::RateSeries;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::engine::ExchangeRate;
use crate::error::FxResult;

impl ExchangeRate {
    /// Convert `amount` from `from` to `to` at the rate of `date`, or at the
    /// latest rate when no date is given.
    #[instrument(skip(self))]
    pub fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        date: Option<NaiveDate>,
    ) -> FxResult<Decimal> {
        let rate = self.exchange_rate(from, to, date)?;
        let converted = amount * rate;

        info!(%rate, %converted, "Conversion completed");

        Ok(converted)
    }

    /// Convert `amount` at every rate of `[date, end_date]`, ascending by date.
    #[instrument(skip(self))]
    pub fn convert_between_date_range(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
        date: NaiveDate,
        end_date: NaiveDate,
    ) -> FxResult<RateSeries> {
        let converted: RateSeries = self
            .exchange_rate_between_date_range(from, to, date, end_date)?
            .into_iter()
            .map(|(day, rate)| (day, amount * rate))
            .collect();

        info!(days = converted.len(), "Range conversion completed");

        Ok(converted)
    }
}
