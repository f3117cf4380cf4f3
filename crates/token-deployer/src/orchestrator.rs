//! Drives a batch of deployments, strictly one after another.

use {
    crate::{
        audit::AuditLog,
        chain::Chain,
        deployment::{Deployer, DeploymentAttempt, Outcome},
        token::TokenGenerator,
    },
    anyhow::{Context, Result},
    rand::Rng,
    std::{fmt, time::Duration},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    /// Deploying the token with this (0 based) index.
    Running(usize),
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requested, {} succeeded, {} failed",
            self.requested, self.succeeded, self.failed
        )
    }
}

pub struct Orchestrator<C, R, L> {
    deployer: Deployer<C>,
    generator: TokenGenerator<R>,
    log: L,
    count: usize,
    delay: Duration,
    state: State,
}

impl<C, R, L> Orchestrator<C, R, L>
where
    C: Chain,
    R: Rng,
    L: AuditLog,
{
    pub fn new(
        deployer: Deployer<C>,
        generator: TokenGenerator<R>,
        log: L,
        count: usize,
        delay: Duration,
    ) -> Self {
        Self {
            deployer,
            generator,
            log,
            count,
            delay,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Deploys `count` tokens. Individual failures are recorded and the batch
    /// moves on; only failing to write the audit log stops it.
    pub async fn run(&mut self) -> Result<Summary> {
        let mut summary = Summary {
            requested: self.count,
            ..Default::default()
        };
        let deployer = self.deployer.address();
        tracing::info!(%deployer, count = self.count, "starting deployment batch");
        self.record(&format!("Deployer Address: {deployer}"))?;

        self.state = self.advance(0);
        while let State::Running(index) = self.state {
            tracing::info!("Deploying token {} of {}", index + 1, self.count);
            let spec = self.generator.generate();
            tracing::info!(
                token = %spec,
                %deployer,
                gas_price_gwei = %number::format_gwei(self.deployer.gas_price()),
                supply = %spec.supply,
                "deploying"
            );

            let attempt = self.deployer.attempt(spec).await;
            match &attempt.outcome {
                Outcome::Success(_) => summary.succeeded += 1,
                Outcome::Failure { .. } => summary.failed += 1,
            }
            self.record(&outcome_entry(&attempt))?;

            tokio::time::sleep(self.delay).await;
            self.state = self.advance(index + 1);
        }

        tracing::info!(%summary, "deployment batch finished");
        self.record(&format!("Deploy process finished ({summary})"))?;
        Ok(summary)
    }

    fn advance(&self, next: usize) -> State {
        if next < self.count {
            State::Running(next)
        } else {
            State::Done
        }
    }

    fn record(&mut self, message: &str) -> Result<()> {
        self.log
            .record(message)
            .context("failed to write audit log")
    }
}

fn outcome_entry(attempt: &DeploymentAttempt) -> String {
    let spec = &attempt.spec;
    let gas = gas_entry(attempt);
    match &attempt.outcome {
        Outcome::Success(deployment) => {
            tracing::info!(
                token = %spec,
                contract = %deployment.contract_address,
                tx_hash = %deployment.tx_hash,
                block_hash = %deployment.block_hash,
                duration = ?deployment.duration,
                "deployed"
            );
            format!(
                "SUCCESS: {spec} deployed. Contract: {} | TX Hash: {} | Blockhash: {} | {gas} | \
                 Duration: {:.3}s",
                deployment.contract_address,
                deployment.tx_hash,
                deployment.block_hash,
                deployment.duration.as_secs_f64(),
            )
        }
        Outcome::Failure { reason } => {
            let elapsed = attempt.started_at.elapsed();
            tracing::warn!(token = %spec, %reason, ?elapsed, "deployment failed");
            format!(
                "ERROR: failed to deploy {spec} - {reason} | {gas} | Elapsed: {:.3}s",
                elapsed.as_secs_f64()
            )
        }
    }
}

/// `Gas: 500000 (fallback) estimated, limit 1000000, price 1.5 gwei`
fn gas_entry(attempt: &DeploymentAttempt) -> String {
    let price = number::format_gwei(attempt.gas_price);
    match (&attempt.estimate, attempt.gas_limit) {
        (Some(estimate), Some(limit)) => {
            format!("Gas: {estimate} estimated, limit {limit}, price {price} gwei")
        }
        _ => format!("Gas: not estimated, price {price} gwei"),
    }
}
