//! Provider request shapes and projection of their responses.
//!
//! | Request      | Path           | Query                                  |
//! |--------------|----------------|----------------------------------------|
//! | currencies   | `/latest`      | none                                   |
//! | latest       | `/latest`      | `base`                                 |
//! | historical   | `/YYYY-MM-DD`  | `base`                                 |
//! | history      | `/history`     | `base`, `start_at`, `end_at`, `symbols`|

use chrono::NaiveDate;
use exchange_rates_common::{format_date, parse_date, CurrencyCode, RateSeries};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::TransportError;
use crate::transport::{Query, ResponseBody, Transport};

/// A request to the rates provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderRequest {
    /// Latest rates against the provider's default base.
    Currencies,
    /// Latest rates against `base`.
    Latest { base: CurrencyCode },
    /// Rates against `base` on a past day.
    Historical { base: CurrencyCode, date: NaiveDate },
    /// Rates of `symbol` against `base` for every day in a range.
    History {
        base: CurrencyCode,
        symbol: CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl ProviderRequest {
    pub fn path(&self) -> String {
        match self {
            ProviderRequest::Currencies | ProviderRequest::Latest { .. } => "/latest".to_string(),
            ProviderRequest::Historical { date, .. } => format!("/{}", format_date(*date)),
            ProviderRequest::History { .. } => "/history".to_string(),
        }
    }

    pub fn query(&self) -> Query {
        let pair = |k: &str, v: String| (k.to_string(), v);
        match self {
            ProviderRequest::Currencies => Vec::new(),
            ProviderRequest::Latest { base } | ProviderRequest::Historical { base, .. } => {
                vec![pair("base", base.to_string())]
            }
            ProviderRequest::History {
                base,
                symbol,
                start,
                end,
            } => vec![
                pair("base", base.to_string()),
                pair("start_at", format_date(*start)),
                pair("end_at", format_date(*end)),
                pair("symbols", symbol.to_string()),
            ],
        }
    }

    /// Send the request through `transport`.
    pub fn send(&self, transport: &dyn Transport) -> Result<ResponseBody, TransportError> {
        transport.request(&self.path(), &self.query())
    }
}

fn rates(body: &ResponseBody) -> Result<&serde_json::Map<String, Value>, TransportError> {
    body.get("rates")
        .and_then(Value::as_object)
        .ok_or_else(|| TransportError::MissingField("rates".to_string()))
}

fn decimal(field: &str, value: &Value) -> Result<Decimal, TransportError> {
    let invalid = || TransportError::InvalidRate {
        field: field.to_string(),
        value: value.to_string(),
    };
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return Err(invalid()),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())
}

/// Base currency followed by every quoted currency.
pub fn currency_list(body: &ResponseBody) -> Result<Vec<CurrencyCode>, TransportError> {
    let base = body
        .get("base")
        .and_then(Value::as_str)
        .ok_or_else(|| TransportError::MissingField("base".to_string()))?;

    let mut currencies = vec![parse_code(base)?];
    for code in rates(body)?.keys() {
        currencies.push(parse_code(code)?);
    }
    Ok(currencies)
}

fn parse_code(code: &str) -> Result<CurrencyCode, TransportError> {
    CurrencyCode::parse(code)
        .map_err(|e| TransportError::Decode(format!("unexpected currency: {}", e)))
}

/// `rates[to]` of a latest or historical response.
pub fn single_rate(body: &ResponseBody, to: CurrencyCode) -> Result<Decimal, TransportError> {
    let field = format!("rates.{}", to);
    let value = rates(body)?
        .get(to.as_str())
        .ok_or_else(|| TransportError::MissingField(field.clone()))?;
    decimal(&field, value)
}

/// `{date: rates[date][to]}` of a history response, ascending by date.
pub fn rate_series(body: &ResponseBody, to: CurrencyCode) -> Result<RateSeries, TransportError> {
    let mut series = RateSeries::new();
    for (day, quotes) in rates(body)? {
        let field = format!("rates.{}.{}", day, to);
        let date = parse_date(day)
            .map_err(|e| TransportError::Decode(format!("unexpected date {}: {}", day, e)))?;
        let value = quotes
            .get(to.as_str())
            .ok_or_else(|| TransportError::MissingField(field.clone()))?;
        series.insert(date, decimal(&field, value)?);
    }
    Ok(series)
}
