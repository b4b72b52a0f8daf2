//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "OPTIMIZER";

/// CLI configuration
///
/// Sources, lowest precedence first: built-in defaults, the JSON file at
/// `~/.config/cloud-optimizer/config.json`, then `OPTIMIZER_*` variables.
/// Command-line flags override all of them.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default input file for the report command
    pub input: Option<PathBuf>,
    /// Default output format (markdown, table or json)
    pub format: Option<String>,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from the config file and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration using an explicit config file location
    pub fn load_from(path: Option<PathBuf>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| {
            home.join(".config")
                .join("cloud-optimizer")
                .join("config.json")
        })
    }
}
