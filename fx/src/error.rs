//! Conversion error types.

use moneyfx_common::{Currency, CurrencyPair};
use thiserror::Error;

/// Errors that can occur while converting values.
#[derive(Debug, Error)]
pub enum FxError {
    /// A currency in the requested pair has no usable rate in the table.
    #[error("No rate for {currency} (converting {pair})")]
    RateLookup { currency: Currency, pair: CurrencyPair },

    /// Setup data could not be parsed.
    #[error("Invalid rate setup: {0}")]
    InvalidSetup(#[from] serde_json::Error),
}

impl FxError {
    /// Get error code for callers that report errors as strings.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::RateLookup { .. } => "RATE_LOOKUP",
            FxError::InvalidSetup(_) => "INVALID_SETUP",
        }
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
