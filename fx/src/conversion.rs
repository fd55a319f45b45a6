//! Conversion request types.

use moneyfx_common::{Currency, CurrencyPair};
use serde::{Deserialize, Serialize};

use crate::config::ConversionDefaults;

/// Source and target currencies for a conversion. Missing or empty sides fall
/// back to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Currency being converted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Currency>,
    /// Currency being converted into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Currency>,
}

impl ConvertOptions {
    /// Options that use the configured defaults for both sides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options naming both sides.
    pub fn between(from: impl Into<Currency>, to: impl Into<Currency>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Set the source currency.
    pub fn from(mut self, currency: impl Into<Currency>) -> Self {
        self.from = Some(currency.into());
        self
    }

    /// Set the target currency.
    pub fn to(mut self, currency: impl Into<Currency>) -> Self {
        self.to = Some(currency.into());
        self
    }

    /// Fill in missing or empty sides from `defaults`.
    pub fn resolve(&self, defaults: &ConversionDefaults) -> CurrencyPair {
        CurrencyPair::new(
            or_default(&self.from, &defaults.from),
            or_default(&self.to, &defaults.to),
        )
    }
}

fn or_default(code: &Option<Currency>, default: &Currency) -> Currency {
    match code {
        Some(code) if !code.is_empty() => code.clone(),
        _ => default.clone(),
    }
}

/// A value to convert: one number or an ordered run of numbers. The result of
/// a conversion has the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Single(f64),
    Many(Vec<f64>),
}

impl Amount {
    /// Number of values carried.
    pub fn len(&self) -> usize {
        match self {
            Amount::Single(_) => 1,
            Amount::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Multiply every value by `rate`.
    pub(crate) fn scale(self, rate: f64) -> Self {
        match self {
            Amount::Single(value) => Amount::Single(value * rate),
            Amount::Many(mut values) => {
                values.iter_mut().for_each(|v| *v *= rate);
                Amount::Many(values)
            }
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Single(value)
    }
}

impl From<Vec<f64>> for Amount {
    fn from(values: Vec<f64>) -> Self {
        Amount::Many(values)
    }
}

impl From<&[f64]> for Amount {
    fn from(values: &[f64]) -> Self {
        Amount::Many(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ConversionDefaults {
        ConversionDefaults::new(Currency::usd(), Currency::eur())
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let pair = ConvertOptions::new().resolve(&defaults());

        assert_eq!(pair.base, Currency::usd());
        assert_eq!(pair.quote, Currency::eur());
    }

    #[test]
    fn test_resolve_partial_override() {
        let pair = ConvertOptions::new().to("GBP").resolve(&defaults());
        assert_eq!(pair, CurrencyPair::new(Currency::usd(), Currency::gbp()));

        let pair = ConvertOptions::new().from("JPY").resolve(&defaults());
        assert_eq!(pair, CurrencyPair::new(Currency::jpy(), Currency::eur()));
    }

    #[test]
    fn test_resolve_empty_codes_use_defaults() {
        let pair = ConvertOptions::between("", "").resolve(&defaults());
        assert_eq!(pair, CurrencyPair::new(Currency::usd(), Currency::eur()));

        let opts: ConvertOptions = serde_json::from_str(r#"{"from": "", "to": "GBP"}"#).unwrap();
        let pair = opts.resolve(&defaults());
        assert_eq!(pair, CurrencyPair::new(Currency::usd(), Currency::gbp()));
    }

    #[test]
    fn test_between() {
        let opts = ConvertOptions::between("GBP", "EUR");
        assert_eq!(opts.from, Some(Currency::gbp()));
        assert_eq!(opts.to, Some(Currency::eur()));
    }

    #[test]
    fn test_options_deserialize_partial() {
        let opts: ConvertOptions = serde_json::from_str(r#"{"to": "GBP"}"#).unwrap();
        assert_eq!(opts, ConvertOptions::new().to("GBP"));
    }

    #[test]
    fn test_amount_shapes() {
        assert_eq!(Amount::from(2.0).len(), 1);
        assert_eq!(Amount::from(vec![1.0, 2.0, 3.0]).len(), 3);
        assert!(Amount::from(Vec::new()).is_empty());

        let untagged: Amount = serde_json::from_str("[10, 20]").unwrap();
        assert_eq!(untagged, Amount::Many(vec![10.0, 20.0]));
    }

    #[test]
    fn test_amount_scale_keeps_shape() {
        assert_eq!(Amount::Single(10.0).scale(0.5), Amount::Single(5.0));
        assert_eq!(
            Amount::Many(vec![2.0, 4.0]).scale(0.5),
            Amount::Many(vec![1.0, 2.0])
        );
    }
}
