//! A single deployment attempt: estimate, submit, wait and classify.

use {
    crate::{
        chain::Chain,
        confirmation::ConfirmationWaiter,
        executor::{self, Executor},
        gas::{self, GasEstimate},
        token::TokenSpec,
    },
    alloy::{
        primitives::{Address, B256, TxHash},
        rpc::types::TransactionRequest,
    },
    anyhow::anyhow,
    std::time::Duration,
    tokio::time::Instant,
};

/// Why an attempt did not produce a confirmed contract.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("failed to submit deployment transaction: {0:#}")]
    Submission(anyhow::Error),
    #[error(
        "transaction {tx_hash} was not confirmed within {}",
        humantime::format_duration(*after)
    )]
    Timeout { tx_hash: TxHash, after: Duration },
    #[error("deployment transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
    #[error("chain query failed: {0:#}")]
    Chain(anyhow::Error),
}

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub contract_address: Address,
    pub tx_hash: TxHash,
    pub block_hash: B256,
    pub duration: Duration,
}

#[derive(Debug)]
pub enum Outcome {
    Success(Deployment),
    Failure { reason: DeployError },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<Deployment, DeployError>> for Outcome {
    fn from(result: Result<Deployment, DeployError>) -> Self {
        match result {
            Ok(deployment) => Self::Success(deployment),
            Err(reason) => Self::Failure { reason },
        }
    }
}

/// Everything known about one attempt once it is over.
#[derive(Debug)]
pub struct DeploymentAttempt {
    pub spec: TokenSpec,
    pub started_at: Instant,
    pub gas_price: u128,
    /// `None` when the attempt failed before the transaction could be
    /// built, i.e. the constructor arguments could not be encoded.
    pub estimate: Option<GasEstimate>,
    pub gas_limit: Option<u64>,
    pub outcome: Outcome,
}

/// Runs deployment attempts against a chain, one at a time.
pub struct Deployer<C> {
    chain: C,
    executor: Executor,
    waiter: ConfirmationWaiter,
}

impl<C: Chain> Deployer<C> {
    pub fn new(chain: C, executor: Executor, waiter: ConfirmationWaiter) -> Self {
        Self {
            chain,
            executor,
            waiter,
        }
    }

    pub fn address(&self) -> Address {
        self.executor.deployer()
    }

    pub fn gas_price(&self) -> u128 {
        self.executor.gas_price()
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Deploys `spec`. Never fails: every error ends up in the returned
    /// attempt's outcome.
    pub async fn attempt(&self, spec: TokenSpec) -> DeploymentAttempt {
        let started_at = Instant::now();
        let gas_price = self.executor.gas_price();

        let request = match self.executor.deploy_request(&spec) {
            Ok(request) => request,
            Err(err) => {
                return DeploymentAttempt {
                    spec,
                    started_at,
                    gas_price,
                    estimate: None,
                    gas_limit: None,
                    outcome: Outcome::Failure {
                        reason: DeployError::Submission(err),
                    },
                };
            }
        };
        let estimate = gas::estimate(&self.chain, &request).await;
        let gas_limit = executor::gas_limit(&estimate);
        tracing::debug!(token = %spec, %estimate, gas_limit, "estimated deployment gas");

        let outcome = self
            .submit_and_confirm(request, &estimate, started_at)
            .await
            .into();
        DeploymentAttempt {
            spec,
            started_at,
            gas_price,
            estimate: Some(estimate),
            gas_limit: Some(gas_limit),
            outcome,
        }
    }

    async fn submit_and_confirm(
        &self,
        request: TransactionRequest,
        estimate: &GasEstimate,
        started_at: Instant,
    ) -> Result<Deployment, DeployError> {
        let tx_hash = self.executor.execute(&self.chain, request, estimate).await?;
        let receipt = self.waiter.wait(&self.chain, tx_hash).await?;
        if !receipt.success {
            return Err(DeployError::Reverted { tx_hash });
        }
        let contract_address = receipt.contract_address.ok_or_else(|| {
            DeployError::Chain(anyhow!("receipt of {tx_hash} has no contract address"))
        })?;
        let block_hash = self
            .chain
            .block_hash(receipt.block_number)
            .await
            .map_err(DeployError::Chain)?
            .ok_or_else(|| {
                DeployError::Chain(anyhow!("block {} not found", receipt.block_number))
            })?;

        Ok(Deployment {
            contract_address,
            tx_hash,
            block_hash,
            duration: started_at.elapsed(),
        })
    }
}
