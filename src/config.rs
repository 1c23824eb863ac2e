//! Catalog configuration.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Runtime configuration for a [`Catalog`](crate::Catalog).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Fine charged per whole overdue day.
    pub fine_per_day: f64,
    /// Maximum number of closed loans retained for history.
    pub loan_history_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fine_per_day: 10.0,
            loan_history_limit: 1000,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: CatalogConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the deserializer cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.fine_per_day.is_finite() || self.fine_per_day < 0.0 {
            bail!(
                "fine_per_day must be a finite non-negative number, got {}",
                self.fine_per_day
            );
        }
        Ok(())
    }
}
