use {
    crate::{
        artifact::Artifact,
        chain::Chain,
        deployment::DeployError,
        gas::GasEstimate,
        token::TokenSpec,
    },
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt},
        network::TransactionBuilder,
        primitives::{Address, Bytes, TxHash},
        rpc::types::TransactionRequest,
    },
    anyhow::{Context, Result},
    number::TOKEN_DECIMALS,
};

/// Safety margin applied on top of every gas estimate, fallback included.
pub const GAS_LIMIT_MULTIPLIER: u64 = 2;

pub fn gas_limit(estimate: &GasEstimate) -> u64 {
    estimate.value.saturating_mul(GAS_LIMIT_MULTIPLIER)
}

/// Builds and submits contract creation transactions for the token artifact.
pub struct Executor {
    artifact: Artifact,
    deployer: Address,
    gas_price: u128,
}

impl Executor {
    pub fn new(artifact: Artifact, deployer: Address, gas_price: u128) -> Self {
        Self {
            artifact,
            deployer,
            gas_price,
        }
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    /// Gas price in wei used for every submission.
    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }

    /// Contract creation request for `spec` without any gas parameters, as
    /// used for estimation. The supply is scaled to 18 decimals.
    pub fn deploy_request(&self, spec: &TokenSpec) -> Result<TransactionRequest> {
        let supply = number::parse_token_amount(&spec.supply, TOKEN_DECIMALS)
            .with_context(|| format!("invalid supply {:?}", spec.supply))?;
        let arguments = self
            .artifact
            .constructor
            .abi_encode_input(&[
                DynSolValue::String(spec.name.clone()),
                DynSolValue::String(spec.symbol.clone()),
                DynSolValue::Uint(supply, 256),
            ])
            .context("failed to encode constructor arguments")?;
        let code: Bytes = self
            .artifact
            .bytecode
            .iter()
            .copied()
            .chain(arguments)
            .collect();

        Ok(TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(code))
    }

    /// Submits `request` with the configured gas price and twice the
    /// estimated gas as limit.
    pub async fn execute(
        &self,
        chain: &dyn Chain,
        request: TransactionRequest,
        estimate: &GasEstimate,
    ) -> Result<TxHash, DeployError> {
        let request = request
            .with_gas_price(self.gas_price)
            .with_gas_limit(gas_limit(estimate));
        let tx_hash = chain
            .send_transaction(request)
            .await
            .map_err(DeployError::Submission)?;
        tracing::debug!(?tx_hash, "submitted deployment transaction");
        Ok(tx_hash)
    }
}
