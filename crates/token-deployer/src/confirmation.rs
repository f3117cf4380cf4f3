use {
    crate::{
        chain::{Chain, Receipt},
        deployment::DeployError,
    },
    alloy::primitives::TxHash,
    std::time::Duration,
};

/// Waits for deployment transactions to be mined, but no longer than a fixed
/// timeout.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationWaiter {
    timeout: Duration,
    poll_interval: Duration,
}

impl ConfirmationWaiter {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Races the receipt lookup against the timeout. When the timer wins the
    /// lookup future is dropped and the attempt counts as timed out, even
    /// though the transaction may still get mined later.
    pub async fn wait(&self, chain: &dyn Chain, tx_hash: TxHash) -> Result<Receipt, DeployError> {
        match tokio::time::timeout(self.timeout, self.poll_receipt(chain, tx_hash)).await {
            Ok(receipt) => receipt,
            Err(_) => Err(DeployError::Timeout {
                tx_hash,
                after: self.timeout,
            }),
        }
    }

    async fn poll_receipt(
        &self,
        chain: &dyn Chain,
        tx_hash: TxHash,
    ) -> Result<Receipt, DeployError> {
        loop {
            match chain
                .transaction_receipt(tx_hash)
                .await
                .map_err(DeployError::Chain)?
            {
                Some(receipt) => return Ok(receipt),
                None => {
                    tracing::trace!(?tx_hash, "transaction not mined yet");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}
