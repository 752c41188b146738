//! Read-only RPC access to a Crowdfund deployment.
//!
//! Providers created here carry no wallet: the client reads contract state
//! and decodes what the contract emitted, it never signs or submits.

mod reader;

use alloy_primitives::Bytes;
use alloy_provider::{Provider, ProviderBuilder};
pub use reader::{decode_events, CrowdfundReader};
use schema::RevertReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// The contract rejected the call
    #[error("Call reverted: {0}")]
    Reverted(RevertReason),

    /// Transport or decoding failure
    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),
}

impl ClientError {
    /// Map a contract error, decoding revert data against the Crowdfund errors.
    pub fn from_contract(err: alloy_contract::Error) -> Self {
        match err.as_revert_data() {
            Some(data) => Self::Reverted(revert_reason(&data)),
            None => Self::Contract(err),
        }
    }

    /// Whether retrying the same call may succeed.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}

fn revert_reason(data: &Bytes) -> RevertReason {
    schema::codec::decode_revert(schema::crowdfund(), data)
        .unwrap_or_else(|_| RevertReason::Unknown(data.clone()))
}

/// Convenience function to create an ethereum rpc provider from url.
pub async fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}
