//! CLI configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use moneyfx::FxConfig;
use tracing::info;

/// Environment variable naming the rates file.
pub const RATES_ENV: &str = "MONEYFX_RATES";

/// Settings gathered from the environment and command line.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the rates JSON.
    pub rates_path: Option<PathBuf>,
    /// Base currency overriding the one in the rates file.
    pub base: Option<String>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rates_path: None,
            base: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(RATES_ENV) {
            if !path.is_empty() {
                config.rates_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(filter) = std::env::var("RUST_LOG") {
            config.log_filter = filter;
        }

        config
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, rates_path: Option<PathBuf>, base: Option<String>) -> Self {
        if rates_path.is_some() {
            self.rates_path = rates_path;
        }
        if base.is_some() {
            self.base = base;
        }
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.rates_path.is_none() {
            return Err(format!("No rates file given (use --rates or {RATES_ENV})"));
        }

        if matches!(&self.base, Some(base) if base.trim().is_empty()) {
            return Err("Base currency cannot be empty".to_string());
        }

        Ok(())
    }

    /// Read the rates file and apply the base override.
    pub fn load_rates(&self) -> anyhow::Result<FxConfig> {
        let path = self
            .rates_path
            .as_ref()
            .context("No rates file configured")?;
        let file = File::open(path)
            .with_context(|| format!("Failed to open rates file {}", path.display()))?;
        let mut fx_config = FxConfig::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read rates file {}", path.display()))?;

        if let Some(base) = &self.base {
            fx_config.set_base(base.as_str());
        }

        info!(
            path = %path.display(),
            base = %fx_config.base(),
            rates = fx_config.rates().len(),
            "Loaded rates"
        );

        Ok(fx_config)
    }
}
