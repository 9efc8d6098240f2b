// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the analytics engine

use crate::constants::env_config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Hosted data-store connection settings
    pub datastore: DatastoreConfig,
    /// Default horizon for metric forecasts, in days
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon_days: u32,
}

/// Connection settings for the hosted data-store REST API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatastoreConfig {
    /// Base URL of the data-store API (e.g. `https://store.vitalis.app/api/v1`)
    pub base_url: String,
    /// Bearer token for authenticated requests
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_forecast_horizon() -> u32 {
    env_config::forecast_horizon_days()
}

fn default_timeout_secs() -> u64 {
    env_config::datastore_timeout_secs()
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file, falling back to environment
    /// variables when no file exists
    pub fn load(path: Option<String>) -> Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        if Path::new(&config_path).exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            dotenv::dotenv().ok();

            Ok(Self {
                datastore: DatastoreConfig {
                    base_url: env_config::datastore_base_url(),
                    api_key: env_config::datastore_api_key(),
                    timeout_secs: env_config::datastore_timeout_secs(),
                },
                forecast_horizon_days: env_config::forecast_horizon_days(),
            })
        }
    }

    /// Persist configuration to a TOML file
    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        let parent = Path::new(&config_path)
            .parent()
            .context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }
}

fn default_config_path() -> String {
    dirs::config_dir()
        .map(|p| p.join("vitalis-analytics/config.toml"))
        .unwrap_or_else(|| "config.toml".into())
        .to_string_lossy()
        .to_string()
}
