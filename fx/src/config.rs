//! Rate configuration: base currency, rate table and conversion defaults.

use std::io::Read;

use chrono::{DateTime, Utc};
use moneyfx_common::{Currency, RateTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FxResult;

/// Setup data handed over by whatever loads the rates.
///
/// Accepts the Open Exchange Rates `latest.json` shape; unknown fields such
/// as `disclaimer` or `license` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FxSetup {
    /// Currency all rates are relative to.
    #[serde(default)]
    pub base: Currency,
    /// Rates relative to `base`.
    #[serde(default)]
    pub rates: RateTable,
    /// Default source currency. Falls back to `base`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Currency>,
    /// Default target currency. Falls back to `base`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Currency>,
    /// When the rates were published, in unix seconds.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Currencies used when a conversion does not name its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionDefaults {
    pub from: Currency,
    pub to: Currency,
}

impl ConversionDefaults {
    pub fn new(from: Currency, to: Currency) -> Self {
        Self { from, to }
    }
}

/// The live rate configuration a conversion reads from.
///
/// Nothing is validated on write. A base missing from the table or a default
/// currency without a rate only shows up as an error when converting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FxConfig {
    base: Currency,
    rates: RateTable,
    defaults: ConversionDefaults,
    timestamp: Option<DateTime<Utc>>,
}

impl FxConfig {
    /// Create a configuration whose default from/to currencies are the base.
    pub fn new(base: impl Into<Currency>, rates: RateTable) -> Self {
        let base = base.into();
        Self {
            defaults: ConversionDefaults::new(base.clone(), base.clone()),
            base,
            rates,
            timestamp: None,
        }
    }

    /// Parse setup JSON.
    pub fn from_json(json: &str) -> FxResult<Self> {
        let setup: FxSetup = serde_json::from_str(json)?;
        Ok(setup.into())
    }

    /// Parse setup JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> FxResult<Self> {
        let setup: FxSetup = serde_json::from_reader(reader)?;
        Ok(setup.into())
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    /// Change the base currency. Stored rates are left as they are.
    pub fn set_base(&mut self, base: impl Into<Currency>) {
        self.base = base.into();
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn rates_mut(&mut self) -> &mut RateTable {
        &mut self.rates
    }

    /// Replace the whole rate table.
    pub fn set_rates(&mut self, rates: RateTable) {
        self.rates = rates;
    }

    /// Insert or overwrite a single rate.
    pub fn set_rate(&mut self, currency: impl Into<Currency>, rate: f64) -> Option<f64> {
        self.rates.insert(currency, rate)
    }

    pub fn defaults(&self) -> &ConversionDefaults {
        &self.defaults
    }

    pub fn set_defaults(&mut self, from: impl Into<Currency>, to: impl Into<Currency>) {
        self.defaults = ConversionDefaults::new(from.into(), to.into());
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.timestamp = timestamp;
    }
}

impl From<FxSetup> for FxConfig {
    fn from(setup: FxSetup) -> Self {
        let or_base = |code: Option<Currency>| {
            code.filter(|c| !c.is_empty())
                .unwrap_or_else(|| setup.base.clone())
        };
        let defaults = ConversionDefaults::new(or_base(setup.from), or_base(setup.to));

        debug!(
            base = %setup.base,
            rates = setup.rates.len(),
            from = %defaults.from,
            to = %defaults.to,
            "Loaded rate setup"
        );

        Self {
            base: setup.base,
            rates: setup.rates,
            defaults,
            timestamp: setup.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATEST: &str = r#"{
        "disclaimer": "Usage subject to terms",
        "license": "https://openexchangerates.org/license",
        "timestamp": 1449877801,
        "base": "USD",
        "rates": {"AED": 3.672538, "GBP": 0.64, "EUR": 0.85}
    }"#;

    #[test]
    fn test_new_defaults_to_base() {
        let config = FxConfig::new("USD", RateTable::new());

        assert_eq!(config.base(), &Currency::usd());
        assert_eq!(config.defaults().from, Currency::usd());
        assert_eq!(config.defaults().to, Currency::usd());
    }

    #[test]
    fn test_from_json_latest_payload() {
        let config = FxConfig::from_json(LATEST).unwrap();

        assert_eq!(config.base(), &Currency::usd());
        assert_eq!(config.rates().len(), 3);
        assert_eq!(config.rates().get(&Currency::gbp()), Some(0.64));
        assert_eq!(config.defaults().from, Currency::usd());
        assert_eq!(config.timestamp().map(|t| t.timestamp()), Some(1449877801));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = FxConfig::from_json(
            r#"{"base": "USD", "rates": {"GBP": 0.64}, "from": "GBP", "to": "EUR"}"#,
        )
        .unwrap();

        assert_eq!(config.defaults().from, Currency::gbp());
        assert_eq!(config.defaults().to, Currency::eur());
        assert_eq!(config.timestamp(), None);
    }

    #[test]
    fn test_from_json_empty_defaults_fall_back_to_base() {
        let config =
            FxConfig::from_json(r#"{"base": "USD", "rates": {}, "from": "", "to": "EUR"}"#)
                .unwrap();

        assert_eq!(config.defaults().from, Currency::usd());
        assert_eq!(config.defaults().to, Currency::eur());
    }

    #[test]
    fn test_from_json_keeps_codes_differing_in_case() {
        let config =
            FxConfig::from_json(r#"{"base": "USD", "rates": {"gbp": 0.5, "GBP": 0.64}}"#)
                .unwrap();

        assert_eq!(config.rates().len(), 2);
        assert_eq!(config.rates().get(&Currency::new("gbp")), Some(0.5));
        assert_eq!(config.rates().get(&Currency::gbp()), Some(0.64));
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = FxConfig::from_json("{}").unwrap();

        assert!(config.base().is_empty());
        assert!(config.rates().is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = FxConfig::from_json(r#"{"rates": [1, 2]}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETUP");
    }

    #[test]
    fn test_from_reader() {
        let config = FxConfig::from_reader(LATEST.as_bytes()).unwrap();
        assert_eq!(config.rates().get(&Currency::new("AED")), Some(3.672538));
    }

    #[test]
    fn test_writes_are_not_validated() {
        let mut config = FxConfig::new("USD", RateTable::new());

        config.set_base("XYZ");
        config.set_defaults("ABC", "DEF");
        assert_eq!(config.set_rate("GBP", 0.64), None);
        assert_eq!(config.set_rate("GBP", 0.65), Some(0.64));

        assert_eq!(config.base(), &Currency::new("XYZ"));
        assert_eq!(config.defaults().to, Currency::new("DEF"));
        assert_eq!(config.rates().get(&Currency::gbp()), Some(0.65));
    }
}
