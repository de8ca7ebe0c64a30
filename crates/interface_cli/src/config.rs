//! CLI configuration

use serde::Deserialize;

/// Runtime configuration, loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Log level filter
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/ledger".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `LEDGER_`-prefixed environment variables
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .add_source(config::Environment::with_prefix("LEDGER"))
            .build()?
            .try_deserialize()
    }
}
