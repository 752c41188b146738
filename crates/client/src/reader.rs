use crate::ClientError;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Log, TransactionReceipt};
use alloy_sol_types::SolEventInterface;
use binding::crowdfund::Crowdfund::{self, CrowdfundEvents};
use config::Deployment;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, warn};

/// View-call reader for a deployed Crowdfund contract.
pub struct CrowdfundReader<P> {
    provider: P,
    address: Address,
}

impl<P> CrowdfundReader<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, address: Address) -> Self {
        Self { provider, address }
    }

    pub const fn from_deployment(provider: P, deployment: &Deployment) -> Self {
        Self::new(provider, deployment.crowdfund)
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    /// Number of campaigns launched so far.
    pub async fn count(&self) -> Result<U256, ClientError> {
        let retry_strategy = ExponentialBackoff::from_millis(100).take(5);

        RetryIf::spawn(
            retry_strategy,
            || async {
                debug!(crowdfund = %self.address, "Querying campaign count");
                let contract = Crowdfund::new(self.address, &self.provider);
                contract
                    .count()
                    .call()
                    .await
                    .map_err(ClientError::from_contract)
            },
            retry_transient,
        )
        .await
    }

    /// Address of the pledge token.
    pub async fn token(&self) -> Result<Address, ClientError> {
        let retry_strategy = ExponentialBackoff::from_millis(100).take(5);

        RetryIf::spawn(
            retry_strategy,
            || async {
                debug!(crowdfund = %self.address, "Querying pledge token");
                let contract = Crowdfund::new(self.address, &self.provider);
                contract
                    .token()
                    .call()
                    .await
                    .map_err(ClientError::from_contract)
            },
            retry_transient,
        )
        .await
    }

    /// Crowdfund events emitted by this contract in a transaction.
    pub fn events(&self, receipt: &TransactionReceipt) -> Vec<CrowdfundEvents> {
        decode_events(self.address, receipt.logs())
    }
}

fn retry_transient(err: &ClientError) -> bool {
    if err.is_transient() {
        warn!(error = %err, "Crowdfund call failed, will retry");
        true
    } else {
        false
    }
}

/// Decode the Crowdfund events among `logs` emitted by `address`.
///
/// Logs from other contracts and logs that do not match a Crowdfund event
/// are skipped.
pub fn decode_events<'a>(
    address: Address,
    logs: impl IntoIterator<Item = &'a Log>,
) -> Vec<CrowdfundEvents> {
    logs.into_iter()
        .filter(|log| log.address() == address)
        .filter_map(|log| {
            match CrowdfundEvents::decode_raw_log(log.topics(), &log.data().data) {
                Ok(event) => Some(event),
                Err(e) => {
                    debug!(error = %e, "Skipping unrecognized log");
                    None
                }
            }
        })
        .collect()
}
