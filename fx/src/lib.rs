//! moneyfx
//!
//! Currency conversion against a table of exchange rates relative to a single
//! base currency.
//!
//! # Features
//!
//! - Cross rates between any two currencies in the table
//! - Scalar and element-wise sequence conversion
//! - Shared, live-updatable configuration for multi-threaded callers
//! - Chainable wrapper that can read a value and code out of text
//!
//! # Example
//!
//! ```rust,ignore
//! use moneyfx::{convert, ConvertOptions, FxConfig};
//!
//! let config = FxConfig::from_json(r#"{"base": "USD", "rates": {"GBP": 0.64, "EUR": 0.85}}"#)?;
//!
//! let gbp = convert(&config, 10.0, &ConvertOptions::between("USD", "GBP"))?;
//! assert!((gbp - 6.4).abs() < 1e-9);
//! ```

pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod wrapper;

pub use config::{ConversionDefaults, FxConfig, FxSetup};
pub use conversion::{Amount, ConvertOptions};
pub use engine::{convert, convert_amount, convert_in_place, convert_many, cross_rate, FxEngine};
pub use error::{FxError, FxResult};
pub use wrapper::Fx;

pub use moneyfx_common::{Currency, CurrencyPair, RateTable};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
