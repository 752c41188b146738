//! Deployment configuration for the Crowdfund contracts.
//!
//! Provides the chain and contract addresses a client talks to, with
//! defaults per network type and TOML loading.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0} address must not be zero")]
    ZeroAddress(&'static str),

    #[error("Chain id must not be zero")]
    ZeroChainId,
}

/// Network type (mainnet, testnet or a local dev node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
    Local,
}

impl NetworkType {
    /// Default chain id: Ethereum mainnet, Sepolia, or anvil/hardhat.
    pub const fn default_chain_id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Testnet => 11155111,
            Self::Local => 31337,
        }
    }
}

/// Where the Crowdfund contract and its pledge token live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Network type
    pub network: NetworkType,
    /// Chain ID
    pub chain_id: u64,
    /// Crowdfund contract address
    pub crowdfund: Address,
    /// Pledge token (IERC20) address
    pub token: Address,
}

impl Deployment {
    /// Parse a deployment from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let deployment: Self = toml::from_str(contents)?;
        deployment.validate()?;
        Ok(deployment)
    }

    /// Load a deployment from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject zero addresses and chain id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id == 0 {
            return Err(ConfigError::ZeroChainId);
        }

        if self.crowdfund == Address::ZERO {
            return Err(ConfigError::ZeroAddress("Crowdfund"));
        }

        if self.token == Address::ZERO {
            return Err(ConfigError::ZeroAddress("Token"));
        }

        Ok(())
    }
}

/// Builder for deployment configurations.
#[derive(Debug, Clone)]
pub struct DeploymentBuilder {
    network: NetworkType,
    chain_id: u64,
    crowdfund: Address,
    token: Address,
}

impl DeploymentBuilder {
    /// Start from the defaults of a network type. Addresses start out zero.
    pub const fn new(network: NetworkType) -> Self {
        Self {
            network,
            chain_id: network.default_chain_id(),
            crowdfund: Address::ZERO,
            token: Address::ZERO,
        }
    }

    /// Start with mainnet defaults.
    pub const fn mainnet() -> Self {
        Self::new(NetworkType::Mainnet)
    }

    /// Start with testnet defaults.
    pub const fn testnet() -> Self {
        Self::new(NetworkType::Testnet)
    }

    /// Start with local dev node defaults.
    pub const fn local() -> Self {
        Self::new(NetworkType::Local)
    }

    /// Override the chain id.
    pub const fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the Crowdfund contract address.
    pub const fn crowdfund(mut self, address: Address) -> Self {
        self.crowdfund = address;
        self
    }

    /// Set the pledge token address.
    pub const fn token(mut self, address: Address) -> Self {
        self.token = address;
        self
    }

    /// Build and validate the deployment.
    pub fn build(self) -> Result<Deployment, ConfigError> {
        let deployment = Deployment {
            network: self.network,
            chain_id: self.chain_id,
            crowdfund: self.crowdfund,
            token: self.token,
        };
        deployment.validate()?;
        Ok(deployment)
    }
}
