//! Configuration
//!
//! Loaded from a TOML file, with `NFT_MARKET_*` environment overrides
//! (a `.env` file is read first when present). Node and indexer URLs may be
//! omitted for the public networks; they are filled from the preset.

use crate::error::FailureKind;
use crate::indexer::image::{DEFAULT_IPFS_GATEWAY, DEFAULT_PLACEHOLDER};
use crate::payload::{Address, CoinType, MarketplacePayloads, APTOS_COIN};
use crate::runner::RunnerConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

impl ConfigError {
    /// Configuration problems need a fix, not a retry
    pub fn is_retryable(&self) -> bool {
        false
    }

    pub fn category(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "io",
            ConfigError::Parse(_) => "parse",
            ConfigError::Validation(_) => "validation",
            ConfigError::MissingEnvVar(_) => "missing_env",
        }
    }

    pub fn kind(&self) -> FailureKind {
        FailureKind::InvalidInput
    }
}

/// Target network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    /// Local or private deployment; URLs must be given explicitly
    Custom,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Custom => "custom",
        }
    }

    /// Public fullnode REST endpoint
    pub fn node_url(&self) -> Option<String> {
        match self {
            Network::Custom => None,
            net => Some(format!("https://fullnode.{}.aptoslabs.com/v1", net.as_str())),
        }
    }

    /// Public indexer GraphQL endpoint
    pub fn indexer_url(&self) -> Option<String> {
        match self {
            Network::Custom => None,
            net => Some(format!("https://api.{}.aptoslabs.com/v1/graphql", net.as_str())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "custom" | "local" => Ok(Network::Custom),
            other => Err(ConfigError::Validation(format!("Unknown network '{}'", other))),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    pub marketplace: MarketplaceConfig,

    #[serde(default)]
    pub runner: RunnerSettings,

    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub name: Network,

    /// Fullnode REST base URL; defaults to the network preset
    #[serde(default)]
    pub node_url: Option<String>,

    /// Indexer GraphQL URL; defaults to the network preset
    #[serde(default)]
    pub indexer_url: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Address the marketplace contract is published at
    pub contract_address: String,

    /// Fee schedule used to scope listing queries
    #[serde(default)]
    pub fee_schedule: Option<String>,

    /// Settlement coin used when an operation does not name one
    #[serde(default = "default_coin_type")]
    pub coin_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSettings {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_confirmation_timeout")]
    pub confirmation_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_ipfs_gateway")]
    pub ipfs_gateway: String,

    #[serde(default = "default_placeholder")]
    pub placeholder_image: String,
}

// Default value functions
fn default_request_timeout() -> u64 { 30 }
fn default_coin_type() -> String { APTOS_COIN.to_string() }
fn default_poll_interval() -> u64 { 500 }
fn default_confirmation_timeout() -> u64 { 30 }
fn default_ipfs_gateway() -> String { DEFAULT_IPFS_GATEWAY.to_string() }
fn default_placeholder() -> String { DEFAULT_PLACEHOLDER.to_string() }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: Network::default(),
            node_url: None,
            indexer_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            confirmation_timeout_secs: default_confirmation_timeout(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway: default_ipfs_gateway(),
            placeholder_image: default_placeholder(),
        }
    }
}

impl Config {
    /// Defaults for a public network and a contract address
    pub fn for_network(network: Network, contract_address: &str) -> Self {
        let mut config = Self {
            network: NetworkConfig {
                name: network,
                ..NetworkConfig::default()
            },
            marketplace: MarketplaceConfig {
                contract_address: contract_address.to_string(),
                fee_schedule: None,
                coin_type: default_coin_type(),
            },
            runner: RunnerSettings::default(),
            media: MediaConfig::default(),
        };
        config.fill_presets();
        config
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::parse_file(path.as_ref())?;
        config.fill_presets();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` and environment variable overrides
    pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let mut config = Self::parse_file(path.as_ref())?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.fill_presets();
        config.validate()?;
        Ok(config)
    }

    /// Build entirely from the environment; `NFT_MARKET_CONTRACT` is required
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let contract = lookup("NFT_MARKET_CONTRACT")
            .ok_or_else(|| ConfigError::MissingEnvVar("NFT_MARKET_CONTRACT".to_string()))?;
        let mut config = Self::for_network(Network::default(), &contract);
        config.network.node_url = None;
        config.network.indexer_url = None;
        config.apply_overrides(lookup)?;
        config.fill_presets();
        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `NFT_MARKET_*` overrides
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        fn number(key: &str, value: String) -> Result<u64, ConfigError> {
            value.trim().parse().map_err(|_| {
                ConfigError::Parse(format!("{} must be an integer, got '{}'", key, value))
            })
        }

        if let Some(name) = lookup("NFT_MARKET_NETWORK") {
            self.network.name = name.parse()?;
        }
        if let Some(url) = lookup("NFT_MARKET_NODE_URL") {
            self.network.node_url = Some(url);
        }
        if let Some(url) = lookup("NFT_MARKET_INDEXER_URL") {
            self.network.indexer_url = Some(url);
        }
        if let Some(contract) = lookup("NFT_MARKET_CONTRACT") {
            self.marketplace.contract_address = contract;
        }
        if let Some(fee_schedule) = lookup("NFT_MARKET_FEE_SCHEDULE") {
            self.marketplace.fee_schedule = Some(fee_schedule);
        }
        if let Some(coin) = lookup("NFT_MARKET_COIN_TYPE") {
            self.marketplace.coin_type = coin;
        }
        if let Some(v) = lookup("NFT_MARKET_POLL_INTERVAL_MS") {
            self.runner.poll_interval_ms = number("NFT_MARKET_POLL_INTERVAL_MS", v)?;
        }
        if let Some(v) = lookup("NFT_MARKET_CONFIRMATION_TIMEOUT_SECS") {
            self.runner.confirmation_timeout_secs =
                number("NFT_MARKET_CONFIRMATION_TIMEOUT_SECS", v)?;
        }
        Ok(())
    }

    /// Switch to another network; URLs are reset to its preset unless it is custom
    pub fn with_network(mut self, network: Network) -> Self {
        if network != Network::Custom {
            self.network.node_url = network.node_url();
            self.network.indexer_url = network.indexer_url();
        }
        self.network.name = network;
        self
    }

    fn fill_presets(&mut self) {
        if self.network.node_url.is_none() {
            self.network.node_url = self.network.name.node_url();
        }
        if self.network.indexer_url.is_none() {
            self.network.indexer_url = self.network.name.indexer_url();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, url) in [
            ("node_url", &self.network.node_url),
            ("indexer_url", &self.network.indexer_url),
        ] {
            match url {
                None => {
                    return Err(ConfigError::Validation(format!(
                        "{} is required for network '{}'",
                        label, self.network.name
                    )))
                }
                Some(u) if !u.starts_with("http://") && !u.starts_with("https://") => {
                    return Err(ConfigError::Validation(format!(
                        "Invalid URL format for {}: {}",
                        label, u
                    )))
                }
                Some(_) => {}
            }
        }

        if self.network.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        self.contract()?;
        self.fee_schedule()?;
        self.coin_type()?;

        if self.runner.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be > 0".to_string(),
            ));
        }
        if self.runner.confirmation_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "confirmation_timeout_secs must be > 0".to_string(),
            ));
        }
        let timeout_ms = self.runner.confirmation_timeout_secs.saturating_mul(1000);
        if self.runner.poll_interval_ms >= timeout_ms {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be shorter than the confirmation timeout".to_string(),
            ));
        }
        Ok(())
    }

    pub fn node_url(&self) -> Result<&str, ConfigError> {
        self.network
            .node_url
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("node_url is not set".to_string()))
    }

    pub fn indexer_url(&self) -> Result<&str, ConfigError> {
        self.network
            .indexer_url
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("indexer_url is not set".to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.request_timeout_secs)
    }

    pub fn contract(&self) -> Result<Address, ConfigError> {
        Address::parse(&self.marketplace.contract_address)
            .map_err(|e| ConfigError::Validation(format!("contract_address: {}", e)))
    }

    pub fn fee_schedule(&self) -> Result<Option<Address>, ConfigError> {
        self.marketplace
            .fee_schedule
            .as_deref()
            .map(|fs| {
                Address::parse(fs)
                    .map_err(|e| ConfigError::Validation(format!("fee_schedule: {}", e)))
            })
            .transpose()
    }

    pub fn coin_type(&self) -> Result<CoinType, ConfigError> {
        CoinType::parse(&self.marketplace.coin_type)
            .map_err(|e| ConfigError::Validation(format!("coin_type: {}", e)))
    }

    /// Payload factory for the configured contract and coin
    pub fn payloads(&self) -> Result<MarketplacePayloads, ConfigError> {
        Ok(MarketplacePayloads::new(self.contract()?).with_default_coin(self.coin_type()?))
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            poll_interval: Duration::from_millis(self.runner.poll_interval_ms),
            confirmation_timeout: Duration::from_secs(self.runner.confirmation_timeout_secs),
        }
    }
}
