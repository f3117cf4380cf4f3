//! The chain capabilities a deployment needs, and their implementation on
//! top of an alloy provider.

use {
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, B256, TxHash},
        providers::Provider,
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result, anyhow},
    ethrpc::{AlloyProvider, alloy::errors::TransportErrorExt},
};

/// The parts of a transaction receipt the deployer looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub block_number: u64,
    /// Address of the created contract, if the transaction created one.
    pub contract_address: Option<Address>,
    /// `false` if the transaction reverted.
    pub success: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Chain: Send + Sync {
    /// Simulates `tx` and returns the gas it would use.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64>;

    /// Signs and broadcasts `tx`, returning the hash of the now pending
    /// transaction.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash>;

    /// Returns `None` while the transaction is not mined yet.
    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>>;

    /// Hash of the block with the given number, `None` if the node does not
    /// know it.
    async fn block_hash(&self, number: u64) -> Result<Option<B256>>;
}

pub struct RpcChain {
    provider: AlloyProvider,
}

impl RpcChain {
    pub fn new(provider: AlloyProvider) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl Chain for RpcChain {
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64> {
        self.provider
            .estimate_gas(tx.clone())
            .await
            .context("eth_estimateGas")
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        // A rejected transaction must not consume a nonce.
        let from = tx.from.context("transaction has no sender")?;
        let nonce = self
            .provider
            .get_transaction_count(from)
            .pending()
            .await
            .context("eth_getTransactionCount")?;
        let tx = tx.with_nonce(nonce);
        tracing::debug!(%from, nonce, "submitting transaction");

        match self.provider.send_transaction(tx).await {
            Ok(pending) => Ok(*pending.tx_hash()),
            Err(err) => {
                let context = match err.rejection() {
                    Some(rejection) => format!("node rejected transaction ({rejection:?})"),
                    None => "could not reach node".to_string(),
                };
                Err(anyhow!(err).context(context))
            }
        }
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .context("eth_getTransactionReceipt")?;
        // Some nodes return receipts of pending transactions without a block.
        Ok(receipt.and_then(|receipt| {
            Some(Receipt {
                transaction_hash: receipt.transaction_hash(),
                block_number: receipt.block_number()?,
                contract_address: receipt.contract_address(),
                success: receipt.status(),
            })
        }))
    }

    async fn block_hash(&self, number: u64) -> Result<Option<B256>> {
        let block = self
            .provider
            .get_block_by_number(number.into())
            .await
            .context("eth_getBlockByNumber")?;
        Ok(block.map(|block| block.header.hash))
    }
}
