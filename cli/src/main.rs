//! moneyfx CLI
//!
//! Converts values between currencies using a rates file in the Open
//! Exchange Rates `latest.json` shape.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moneyfx::ConvertOptions;

mod config;
mod convert;

use config::CliConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// moneyfx CLI
#[derive(Parser, Debug)]
#[command(name = "fx")]
#[command(version = moneyfx::VERSION)]
#[command(about = "Convert values between currencies using a rates file")]
struct Args {
    /// Rates JSON file (defaults to $MONEYFX_RATES)
    #[arg(short, long)]
    rates: Option<PathBuf>,

    /// Currency to convert from (defaults to the file's `from` or base)
    #[arg(short, long)]
    from: Option<String>,

    /// Currency to convert into (defaults to the file's `to` or base)
    #[arg(short, long)]
    to: Option<String>,

    /// Base currency, overriding the one in the rates file
    #[arg(long)]
    base: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Values to convert, e.g. `10` or `"£10 GBP"`
    #[arg(required = true, allow_hyphen_values = true)]
    values: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = CliConfig::from_env().with_overrides(args.rates.clone(), args.base.clone());

    // Initialize logging
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter));
    match args.log_format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let fx_config = config.load_rates()?;
    let opts = ConvertOptions {
        from: args.from.as_deref().map(Into::into),
        to: args.to.as_deref().map(Into::into),
    };

    for input in &args.values {
        let value = convert::convert_input(&fx_config, input, &opts)
            .with_context(|| format!("Failed to convert {input:?}"))?;
        debug!(input = %input, value, "Converted");
        println!("{value}");
    }

    Ok(())
}
