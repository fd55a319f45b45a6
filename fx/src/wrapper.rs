//! Chainable wrapper around a value and an optional currency tag.
//!
//! ```rust,ignore
//! let config = FxConfig::from_json(r#"{"base": "USD", "rates": {"GBP": 0.64, "EUR": 0.85}}"#)?;
//!
//! // 10 GBP in EUR, going through the base currency
//! let eur = Fx::new(10.0).from_currency(&config, "GBP")?.to_currency(&config, "EUR")?;
//!
//! // Same thing with the code carried in the text
//! let eur = Fx::parse("£10 GBP").to_currency(&config, "EUR")?;
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use moneyfx_common::Currency;

use crate::config::FxConfig;
use crate::conversion::ConvertOptions;
use crate::engine;
use crate::error::FxResult;

/// A value, optionally tagged with the currency it is in.
#[derive(Debug, Clone, PartialEq)]
pub struct Fx {
    value: f64,
    currency: Option<Currency>,
}

impl Fx {
    /// Wrap an untagged value.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            currency: None,
        }
    }

    /// Wrap a value in a known currency.
    pub fn with_currency(value: f64, currency: impl Into<Currency>) -> Self {
        Self {
            value,
            currency: Some(currency.into()),
        }
    }

    /// Pull a value and currency code out of free-form text.
    ///
    /// The number is whatever parses from the text once everything except
    /// digits, `-` and `.` is dropped (NaN if nothing does). The code is the
    /// ASCII letters of the text, if there are any. This is best-effort:
    /// `"1,000 GBP"` reads as 1000 and `"USD 10 to EUR"` as code `USDtoEUR`. Letter
    /// case is kept, so `"10 gbp"` is tagged `gbp`, not `GBP`.
    pub fn parse(text: &str) -> Self {
        let numeric: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect();
        let code: String = text.chars().filter(char::is_ascii_alphabetic).collect();

        Self {
            value: leading_float(&numeric),
            currency: (!code.is_empty()).then(|| Currency::new(code)),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    /// Convert the wrapped value. The currency tag is not consulted.
    pub fn convert(&self, config: &FxConfig, opts: &ConvertOptions) -> FxResult<f64> {
        engine::convert(config, self.value, opts)
    }

    /// Treat the value as being in `currency` and convert it into the base
    /// currency. The result is tagged with the base.
    pub fn from_currency(
        &self,
        config: &FxConfig,
        currency: impl Into<Currency>,
    ) -> FxResult<Fx> {
        let base = config.base().clone();
        let opts = ConvertOptions::between(currency, base.clone());
        let value = engine::convert(config, self.value, &opts)?;
        Ok(Fx::with_currency(value, base))
    }

    /// Convert into `currency`, from the tagged currency or, if untagged, the
    /// configured default source currency.
    pub fn to_currency(&self, config: &FxConfig, currency: impl Into<Currency>) -> FxResult<f64> {
        let from = self
            .currency
            .clone()
            .unwrap_or_else(|| config.defaults().from.clone());
        engine::convert(config, self.value, &ConvertOptions::between(from, currency))
    }
}

impl From<f64> for Fx {
    fn from(value: f64) -> Self {
        Fx::new(value)
    }
}

impl FromStr for Fx {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Fx::parse(s))
    }
}

/// Longest prefix of `s` that reads as a float, NaN if none does.
fn leading_float(s: &str) -> f64 {
    (1..=s.len())
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
