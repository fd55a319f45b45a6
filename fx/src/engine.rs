//! Conversion engine.
//!
//! The free functions take the configuration explicitly and never write to
//! it. [`FxEngine`] wraps a configuration behind a lock for applications that
//! update rates while other threads convert.

use std::sync::Arc;

use moneyfx_common::{Currency, CurrencyPair, RateTable};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::config::FxConfig;
use crate::conversion::{Amount, ConvertOptions};
use crate::error::{FxError, FxResult};

/// Rate of `currency` against the configured base.
///
/// The base always resolves to 1 whatever the table holds. Zero and NaN
/// entries count as missing.
fn lookup(config: &FxConfig, currency: &Currency, pair: &CurrencyPair) -> FxResult<f64> {
    if currency == config.base() {
        return Ok(1.0);
    }

    match config.rates().get(currency) {
        Some(rate) if rate != 0.0 && !rate.is_nan() => Ok(rate),
        _ => {
            warn!(currency = %currency, pair = %pair, "Rate not available");
            Err(FxError::RateLookup {
                currency: currency.clone(),
                pair: pair.clone(),
            })
        }
    }
}

/// Factor converting one unit of `pair.base` into `pair.quote`.
pub fn cross_rate(config: &FxConfig, pair: &CurrencyPair) -> FxResult<f64> {
    let to_rate = lookup(config, &pair.quote, pair)?;
    let from_rate = lookup(config, &pair.base, pair)?;

    // Base-as-source wins over base-as-target so BASE/BASE takes the first arm.
    let rate = if pair.base == *config.base() {
        to_rate
    } else if pair.quote == *config.base() {
        1.0 / from_rate
    } else {
        to_rate * (1.0 / from_rate)
    };

    debug!(pair = %pair, base = %config.base(), rate, "Resolved cross rate");
    Ok(rate)
}

/// Convert a single value.
pub fn convert(config: &FxConfig, value: f64, opts: &ConvertOptions) -> FxResult<f64> {
    let pair = opts.resolve(config.defaults());
    let rate = cross_rate(config, &pair)?;
    Ok(value * rate)
}

/// Convert every value with the same options, returning a new vector of the
/// same length.
///
/// The rate is resolved up front, so an unknown currency fails even for an
/// empty slice.
pub fn convert_many(
    config: &FxConfig,
    values: &[f64],
    opts: &ConvertOptions,
) -> FxResult<Vec<f64>> {
    let pair = opts.resolve(config.defaults());
    let rate = cross_rate(config, &pair)?;
    Ok(values.iter().map(|value| value * rate).collect())
}

/// Convert values in place. On error the slice is left untouched.
pub fn convert_in_place(
    config: &FxConfig,
    values: &mut [f64],
    opts: &ConvertOptions,
) -> FxResult<()> {
    let pair = opts.resolve(config.defaults());
    let rate = cross_rate(config, &pair)?;
    values.iter_mut().for_each(|value| *value *= rate);
    Ok(())
}

/// Convert a single value or a run of values, keeping the shape.
pub fn convert_amount(
    config: &FxConfig,
    amount: impl Into<Amount>,
    opts: &ConvertOptions,
) -> FxResult<Amount> {
    let pair = opts.resolve(config.defaults());
    let rate = cross_rate(config, &pair)?;
    Ok(amount.into().scale(rate))
}

/// Shared, updatable rate configuration.
///
/// Clones share the same configuration. Conversions hold the read lock for
/// the duration of one call; setters take the write lock, so a conversion
/// never sees a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct FxEngine {
    config: Arc<RwLock<FxConfig>>,
}

impl FxEngine {
    /// Create an engine around an initial configuration.
    pub fn new(config: FxConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Copy of the current configuration.
    pub fn snapshot(&self) -> FxConfig {
        self.config.read().clone()
    }

    /// Run `f` against the current configuration under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&FxConfig) -> R) -> R {
        f(&*self.config.read())
    }

    /// Mutate the configuration under the write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut FxConfig) -> R) -> R {
        f(&mut *self.config.write())
    }

    /// Swap in a new configuration, returning the old one.
    pub fn replace(&self, config: FxConfig) -> FxConfig {
        info!(
            base = %config.base(),
            rates = config.rates().len(),
            "Replacing rate configuration"
        );
        std::mem::replace(&mut *self.config.write(), config)
    }

    pub fn base(&self) -> Currency {
        self.config.read().base().clone()
    }

    pub fn set_base(&self, base: impl Into<Currency>) {
        self.config.write().set_base(base);
    }

    pub fn rates(&self) -> RateTable {
        self.config.read().rates().clone()
    }

    pub fn set_rates(&self, rates: RateTable) {
        debug!(rates = rates.len(), "Setting rate table");
        self.config.write().set_rates(rates);
    }

    pub fn set_rate(&self, currency: impl Into<Currency>, rate: f64) -> Option<f64> {
        self.config.write().set_rate(currency, rate)
    }

    pub fn set_defaults(&self, from: impl Into<Currency>, to: impl Into<Currency>) {
        self.config.write().set_defaults(from, to);
    }

    /// Factor converting one unit of `from` into `to`.
    pub fn cross_rate(&self, from: impl Into<Currency>, to: impl Into<Currency>) -> FxResult<f64> {
        let pair = CurrencyPair::new(from.into(), to.into());
        cross_rate(&self.config.read(), &pair)
    }

    /// Convert a single value.
    #[instrument(skip(self), fields(from = ?opts.from, to = ?opts.to))]
    pub fn convert(&self, value: f64, opts: &ConvertOptions) -> FxResult<f64> {
        convert(&self.config.read(), value, opts)
    }

    /// Convert a run of values with the same options.
    #[instrument(
        skip(self, values),
        fields(count = values.len(), from = ?opts.from, to = ?opts.to)
    )]
    pub fn convert_many(&self, values: &[f64], opts: &ConvertOptions) -> FxResult<Vec<f64>> {
        convert_many(&self.config.read(), values, opts)
    }

    /// Convert values in place.
    pub fn convert_in_place(&self, values: &mut [f64], opts: &ConvertOptions) -> FxResult<()> {
        convert_in_place(&self.config.read(), values, opts)
    }

    /// Convert a single value or a run of values.
    pub fn convert_amount(
        &self,
        amount: impl Into<Amount>,
        opts: &ConvertOptions,
    ) -> FxResult<Amount> {
        convert_amount(&self.config.read(), amount, opts)
    }
}

impl From<FxConfig> for FxEngine {
    fn from(config: FxConfig) -> Self {
        Self::new(config)
    }
}
