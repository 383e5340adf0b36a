//! Input validation errors shared by the exchange rate crates.

use chrono::NaiveDate;
use thiserror::Error;

/// A currency code that is malformed or not quoted by the provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} is not a valid currency code")]
pub struct CurrencyCodeError(pub String);

/// A date, or pair of dates, the provider cannot answer for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The date lies after the current day.
    #[error("the date must be in the past")]
    NotInPast { date: NaiveDate },

    /// The start of a range lies after its end.
    #[error("the 'from' date must be before the 'to' date")]
    RangeInverted { start: NaiveDate, end: NaiveDate },
}
