pub mod arguments;
pub mod artifact;
pub mod audit;
pub mod chain;
pub mod config;
pub mod confirmation;
pub mod deployment;
pub mod executor;
pub mod gas;
pub mod orchestrator;
pub mod prompt;
pub mod token;

#[cfg(test)]
mod test_util;

use {
    anyhow::{Context, Result},
    arguments::Arguments,
    audit::FileAuditLog,
    chain::RpcChain,
    config::Config,
    confirmation::ConfirmationWaiter,
    deployment::Deployer,
    executor::Executor,
    orchestrator::{Orchestrator, Summary},
    prompt::Prompt,
    token::TokenGenerator,
};

pub async fn run(args: Arguments) -> Result<Summary> {
    let config = Config::from_arguments(&args, &mut Prompt::terminal())?;
    let address = config.signer.address();
    let provider = ethrpc::alloy::provider_with_signer(&config.rpc_url, "deployer", config.signer);

    let deployer = Deployer::new(
        RpcChain::new(provider),
        Executor::new(config.artifact, address, config.gas_price),
        ConfirmationWaiter::new(config.confirmation_timeout, config.receipt_poll_interval),
    );
    let log = FileAuditLog::open(&config.audit_log_path).with_context(|| {
        format!(
            "failed to open audit log {}",
            config.audit_log_path.display()
        )
    })?;
    tracing::info!(path = %log.path().display(), "appending results to audit log");

    let mut orchestrator = Orchestrator::new(
        deployer,
        TokenGenerator::from_entropy(),
        log,
        config.count,
        config.deployment_delay,
    );
    orchestrator.run().await
}
