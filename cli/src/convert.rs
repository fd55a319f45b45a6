//! Turning command-line inputs into converted values.

use moneyfx::{ConvertOptions, Fx, FxConfig, FxResult};

/// Convert one command-line input.
///
/// Plain numbers go through the options as given. Text carrying a currency
/// code (`"£10 GBP"`) is converted from that code unless `--from` was given.
pub fn convert_input(config: &FxConfig, input: &str, opts: &ConvertOptions) -> FxResult<f64> {
    let fx = Fx::parse(input);

    match (fx.currency(), &opts.from) {
        (Some(_), None) => {
            let to = opts
                .to
                .clone()
                .unwrap_or_else(|| config.defaults().to.clone());
            fx.to_currency(config, to)
        }
        _ => fx.convert(config, opts),
    }
}
