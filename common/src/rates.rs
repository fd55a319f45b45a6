//! Base-relative exchange rate table.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

use crate::Currency;

/// Exchange rates keyed by currency, each expressed against a single base
/// currency (`{"GBP": 0.64}` means one unit of base buys 0.64 GBP).
///
/// The table does not know which currency is the base; that lives with the
/// configuration holding the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(BTreeMap<Currency, f64>);

impl RateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored rate for a currency, if any.
    pub fn get(&self, currency: &Currency) -> Option<f64> {
        self.0.get(currency).copied()
    }

    /// Insert or overwrite a rate, returning the previous value.
    pub fn insert(&mut self, currency: impl Into<Currency>, rate: f64) -> Option<f64> {
        self.0.insert(currency.into(), rate)
    }

    /// Remove a rate.
    pub fn remove(&mut self, currency: &Currency) -> Option<f64> {
        self.0.remove(currency)
    }

    pub fn contains(&self, currency: &Currency) -> bool {
        self.0.contains_key(currency)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate rates in currency-code order.
    pub fn iter(&self) -> btree_map::Iter<'_, Currency, f64> {
        self.0.iter()
    }

    /// Currencies present in the table, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.0.keys()
    }
}

impl<C: Into<Currency>> FromIterator<(C, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (C, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(c, r)| (c.into(), r)).collect())
    }
}

impl<C: Into<Currency>> Extend<(C, f64)> for RateTable {
    fn extend<I: IntoIterator<Item = (C, f64)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(c, r)| (c.into(), r)));
    }
}

impl<'a> IntoIterator for &'a RateTable {
    type Item = (&'a Currency, &'a f64);
    type IntoIter = btree_map::Iter<'a, Currency, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut table = RateTable::new();
        assert!(table.is_empty());

        assert_eq!(table.insert("GBP", 0.64), None);
        assert_eq!(table.insert("GBP", 0.65), Some(0.64));

        assert_eq!(table.get(&Currency::gbp()), Some(0.65));
        assert!(table.contains(&Currency::gbp()));
        assert!(!table.contains(&Currency::eur()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_codes_differing_in_case_are_separate() {
        let table: RateTable = serde_json::from_str(r#"{"gbp": 0.5, "GBP": 0.64}"#).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&Currency::new("gbp")), Some(0.5));
        assert_eq!(table.get(&Currency::gbp()), Some(0.64));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let table: RateTable =
            serde_json::from_str(r#"{"USD": 1, "GBP": 0.64, "EUR": 0.85}"#).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&Currency::usd()), Some(1.0));
        let codes: Vec<&str> = table.currencies().map(Currency::code).collect();
        assert_eq!(codes, vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut table: RateTable = [("GBP", 0.64)].into_iter().collect();
        table.extend([("EUR", 0.85)]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.remove(&Currency::gbp()), Some(0.64));
        assert_eq!(table.len(), 1);
    }
}
