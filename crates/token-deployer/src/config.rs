//! Validated settings for a batch, resolved from the command line and, where
//! needed, from the operator.

use {
    crate::{arguments::Arguments, artifact::Artifact, prompt::Prompt},
    alloy::signers::local::PrivateKeySigner,
    std::{
        io::{BufRead, Write},
        path::PathBuf,
        time::Duration,
    },
    url::Url,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid private key: {0:#}")]
    PrivateKey(anyhow::Error),
    #[error("failed to load token artifact: {0:#}")]
    Artifact(anyhow::Error),
    #[error("{0:?} is not a positive number of tokens to deploy")]
    InvalidCount(String),
    #[error("{value:?} is not a positive amount of Gwei: {reason:#}")]
    InvalidGasPrice { value: String, reason: anyhow::Error },
    #[error("gas price of {0} wei does not fit into 128 bits")]
    GasPriceTooLarge(String),
    #[error("failed to prompt operator: {0}")]
    Prompt(std::io::Error),
    #[error("input ended before all values were provided")]
    EndOfInput,
}

pub struct Config {
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub artifact: Artifact,
    pub audit_log_path: PathBuf,
    pub count: usize,
    /// In wei.
    pub gas_price: u128,
    pub confirmation_timeout: Duration,
    pub receipt_poll_interval: Duration,
    pub deployment_delay: Duration,
}

impl Config {
    /// Everything is validated before the first deployment so that a bad input
    /// can never leave a batch half done.
    pub fn from_arguments<R: BufRead, W: Write>(
        args: &Arguments,
        prompt: &mut Prompt<R, W>,
    ) -> Result<Self, ConfigError> {
        let signer = ethrpc::alloy::wallet::signer_from_private_key(&args.private_key)
            .map_err(ConfigError::PrivateKey)?;
        let artifact =
            Artifact::load(&args.abi_path, &args.bytecode_path).map_err(ConfigError::Artifact)?;

        let count = match args.count {
            Some(count) => count.get(),
            None => prompt.ask_count()?,
        };
        let gas_price = match &args.gas_price_gwei {
            Some(gwei) => parse_gas_price(gwei)?,
            None => prompt.ask_gas_price()?,
        };

        Ok(Self {
            rpc_url: args.rpc_url.clone(),
            signer,
            artifact,
            audit_log_path: args.audit_log_path.clone(),
            count,
            gas_price,
            confirmation_timeout: args.confirmation_timeout,
            receipt_poll_interval: args.receipt_poll_interval,
            deployment_delay: args.deployment_delay,
        })
    }
}

pub fn parse_count(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(ConfigError::InvalidCount(value.to_string())),
    }
}

/// Converts a decimal Gwei amount to wei.
pub fn parse_gas_price(value: &str) -> Result<u128, ConfigError> {
    let wei = number::parse_gwei(value).map_err(|reason| ConfigError::InvalidGasPrice {
        value: value.to_string(),
        reason,
    })?;
    u128::try_from(wei).map_err(|_| ConfigError::GasPriceTooLarge(wei.to_string()))
}
