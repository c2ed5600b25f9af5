//! Reporter configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for Solana cluster
    pub rpc_url: String,

    /// Base URL of the oracle price endpoint
    pub oracle_url: String,

    /// Pool account to report on
    pub pool_account: Pubkey,

    /// Oracle feed ids to track
    pub feed_ids: Vec<String>,

    /// Polling interval in seconds (0 = report once and exit)
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("POOLWATCH_CONFIG")
            .unwrap_or_else(|_| "poolwatch-config.toml".to_string());

        let config_str = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// Create default mainnet configuration
    pub fn default_mainnet() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            oracle_url: "https://worker.jup.ag/doves-oracle".to_string(),
            pool_account: Pubkey::from_str(constants::POOL_ACCOUNT).unwrap(),
            feed_ids: constants::DEFAULT_FEED_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
            poll_interval_secs: 0,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_mainnet();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
