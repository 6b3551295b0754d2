//! Configuration types for Lanegate

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ChainSelector, ConfigError, EvmAddress, ThemeConfig};

/// A configured EVM chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Short name used in lanes and API paths (e.g., "ethereum-sepolia")
    pub name: String,

    /// EVM chain id
    pub chain_id: u64,

    /// Bridge router chain selector
    pub selector: ChainSelector,

    /// JSON-RPC endpoint URL
    pub rpc_url: String,

    /// Bridge router contract on this chain
    pub router: EvmAddress,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Chains the widget can bridge between
    #[serde(default = "default_chains")]
    pub chains: Vec<ChainConfig>,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Timeout applied to every JSON-RPC request
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,

    /// How long a fetched rate-limit snapshot is reused
    #[serde(default = "default_rate_limit_ttl_secs")]
    pub rate_limit_ttl_secs: u64,

    /// Widget theme
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_api_port() -> u16 {
    19070
}

fn default_rpc_timeout_secs() -> u64 {
    15
}

fn default_rate_limit_ttl_secs() -> u64 {
    10
}

fn default_chains() -> Vec<ChainConfig> {
    vec![
        ChainConfig {
            name: "ethereum-sepolia".to_string(),
            chain_id: 11155111,
            selector: ChainSelector(16015286601757825753),
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            router: "0x0BF3dE8c5D3e8A2B34D2BEeB17ABfCeBaf363A59"
                .parse()
                .unwrap_or(EvmAddress::ZERO),
        },
        ChainConfig {
            name: "avalanche-fuji".to_string(),
            chain_id: 43113,
            selector: ChainSelector(14767482510784806043),
            rpc_url: "https://api.avax-test.network/ext/bc/C/rpc".to_string(),
            router: "0xF694E193200268f9a4868e4Aa017A0118C9a8177"
                .parse()
                .unwrap_or(EvmAddress::ZERO),
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chains: default_chains(),
            api_port: default_api_port(),
            rpc_timeout_secs: default_rpc_timeout_secs(),
            rate_limit_ttl_secs: default_rate_limit_ttl_secs(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a JSON config document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that chain names and selectors are unique and the theme is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        let mut selectors = HashSet::new();

        for chain in &self.chains {
            if !names.insert(chain.name.as_str()) {
                return Err(ConfigError::DuplicateChain {
                    name: chain.name.clone(),
                });
            }
            if !selectors.insert(chain.selector) {
                return Err(ConfigError::DuplicateSelector {
                    selector: chain.selector.as_u64(),
                    name: chain.name.clone(),
                });
            }
        }

        self.theme.validate()
    }

    /// Look up a chain by name
    pub fn chain(&self, name: &str) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.name == name)
    }
}
