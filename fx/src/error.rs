//! FX engine error types.

use exchange_rates_common::{CurrencyCodeError, DateError};
use thiserror::Error;

/// Errors that can occur in the FX engine.
#[derive(Debug, Error)]
pub enum FxError {
    /// Currency code is malformed or not quoted by the provider.
    #[error(transparent)]
    InvalidCurrencyCode(#[from] CurrencyCodeError),

    /// Date is in the future, or a range is inverted.
    #[error(transparent)]
    InvalidDate(#[from] DateError),

    /// Transport collaborator failed. Surfaced as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration rejected at construction.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FxError {
    /// Check if this error was caused by the caller's input, as opposed to
    /// network conditions.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FxError::InvalidCurrencyCode(_) | FxError::InvalidDate(_)
        )
    }
}

/// Errors raised while talking to the rates provider or decoding its answer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("provider returned status {status} for {path}")]
    Status { status: u16, path: String },

    /// Body was not a JSON object.
    #[error("failed to decode the response: {0}")]
    Decode(String),

    /// A field required to build the result is absent.
    #[error("response is missing {0}")]
    MissingField(String),

    /// A rate could not be read as a decimal number.
    #[error("invalid rate {value} for {field}")]
    InvalidRate { field: String, value: String },
}

/// Errors from a [`KeyValueStore`](crate::store::KeyValueStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
