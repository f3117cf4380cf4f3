use {
    crate::chain::Chain,
    alloy::rpc::types::TransactionRequest,
    std::fmt,
};

/// Gas assumed for a deployment when the node can't estimate it.
pub const FALLBACK_GAS: u64 = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasEstimate {
    pub value: u64,
    pub is_fallback: bool,
}

impl GasEstimate {
    pub fn fallback() -> Self {
        Self {
            value: FALLBACK_GAS,
            is_fallback: true,
        }
    }
}

impl fmt::Display for GasEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_fallback {
            true => write!(f, "{} (fallback)", self.value),
            false => write!(f, "{}", self.value),
        }
    }
}

/// Estimates the gas of the deployment transaction `tx`.
///
/// Estimation failures (node errors, reverting simulations, malformed calls)
/// are not propagated; they are logged and [`FALLBACK_GAS`] is used instead.
pub async fn estimate(chain: &dyn Chain, tx: &TransactionRequest) -> GasEstimate {
    match chain.estimate_gas(tx).await {
        Ok(value) => GasEstimate {
            value,
            is_fallback: false,
        },
        Err(err) => {
            tracing::warn!(?err, fallback = FALLBACK_GAS, "gas estimation failed, using default");
            GasEstimate::fallback()
        }
    }
}
