//! Input validation for rate lookups.

use chrono::NaiveDate;
use exchange_rates_common::{today, CurrencyCode, CurrencySet, DateError};

use crate::error::FxResult;

/// Check that `code` is a well-formed code quoted by the provider.
pub fn validate_currency_code(known: &CurrencySet, code: &str) -> FxResult<CurrencyCode> {
    Ok(known.lookup(code)?)
}

/// Reject a date after the current day.
pub fn validate_date(date: NaiveDate) -> FxResult<()> {
    validate_date_on(date, today())
}

/// Reject a range with a bound after the current day, or with `start > end`.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> FxResult<()> {
    validate_date_range_on(start, end, today())
}

fn validate_date_on(date: NaiveDate, today: NaiveDate) -> FxResult<()> {
    if date > today {
        return Err(DateError::NotInPast { date }.into());
    }
    Ok(())
}

fn validate_date_range_on(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> FxResult<()> {
    validate_date_on(start, today)?;
    validate_date_on(end, today)?;

    if start > end {
        return Err(DateError::RangeInverted { start, end }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use chrono::Duration;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_currency_code() {
        let known = CurrencySet::fallback();
        assert_eq!(
            validate_currency_code(&known, "GBP").unwrap(),
            CurrencyCode::gbp()
        );
    }

    #[test]
    fn test_invalid_currency_code_message() {
        let known = CurrencySet::fallback();
        let err = validate_currency_code(&known, "INVALID").unwrap_err();

        assert!(matches!(err, FxError::InvalidCurrencyCode(_)));
        assert_eq!(err.to_string(), "INVALID is not a valid currency code");
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_currency_code() {
        let known = CurrencySet::fallback();
        let err = validate_currency_code(&known, "XYZ").unwrap_err();
        assert_eq!(err.to_string(), "XYZ is not a valid currency code");
    }

    #[test]
    fn test_future_date_rejected() {
        let err = validate_date(today() + Duration::days(1)).unwrap_err();

        assert!(matches!(
            err,
            FxError::InvalidDate(DateError::NotInPast { .. })
        ));
        assert_eq!(err.to_string(), "the date must be in the past");
    }

    #[test]
    fn test_today_and_past_accepted() {
        assert!(validate_date(today()).is_ok());
        assert!(validate_date(date(2019, 11, 8)).is_ok());
    }

    #[test]
    fn test_range_bounds_in_future() {
        let today = today();
        let err = validate_date_range(today + Duration::days(1), today - Duration::days(1))
            .unwrap_err();
        assert_eq!(err.to_string(), "the date must be in the past");

        let err = validate_date_range(today - Duration::days(1), today + Duration::days(1))
            .unwrap_err();
        assert_eq!(err.to_string(), "the date must be in the past");
    }

    #[test]
    fn test_inverted_range() {
        let today = today();
        let err = validate_date_range(today - Duration::days(1), today - Duration::weeks(1))
            .unwrap_err();

        assert!(matches!(
            err,
            FxError::InvalidDate(DateError::RangeInverted { .. })
        ));
        assert_eq!(
            err.to_string(),
            "the 'from' date must be before the 'to' date"
        );
    }

    #[test]
    fn test_single_day_range_accepted() {
        assert!(validate_date_range(date(2019, 11, 8), date(2019, 11, 8)).is_ok());
    }

    proptest! {
        #[test]
        fn prop_validate_date_against_today(offset in -5_000i64..5_000) {
            let today = date(2020, 6, 15);
            let candidate = today + Duration::days(offset);
            prop_assert_eq!(validate_date_on(candidate, today).is_ok(), offset <= 0);
        }

        #[test]
        fn prop_inverted_range_rejected_in_past(
            start_back in 0i64..5_000,
            gap in 1i64..1_000,
        ) {
            let today = date(2020, 6, 15);
            let start = today - Duration::days(start_back);
            let end = start - Duration::days(gap);
            let err = validate_date_range_on(start, end, today).unwrap_err();
            prop_assert!(
                matches!(err, FxError::InvalidDate(DateError::RangeInverted { .. })),
                "unexpected error: {}",
                err
            );
        }
    }
}
