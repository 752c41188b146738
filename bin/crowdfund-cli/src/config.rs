use config::Deployment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url
    pub rpc_url: String,

    /// Contract addresses
    pub deployment: Deployment,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.deployment.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::NetworkType;

    const CONFIG: &str = r#"
        rpc_url = "http://localhost:8545"

        [deployment]
        network = "local"
        chain_id = 31337
        crowdfund = "0x1111111111111111111111111111111111111111"
        token = "0x2222222222222222222222222222222222222222"
    "#;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.deployment.network, NetworkType::Local);
    }

    #[test]
    fn test_zero_address_rejected() {
        let contents = CONFIG.replace(
            "0x2222222222222222222222222222222222222222",
            "0x0000000000000000000000000000000000000000",
        );
        let err = Config::from_toml_str(&contents).unwrap_err();
        assert!(err.to_string().contains("Token"));
    }

    #[test]
    fn test_missing_deployment() {
        assert!(Config::from_toml_str(r#"rpc_url = "http://localhost:8545""#).is_err());
    }
}
