use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = token_deployer::arguments::Arguments::parse();
    let obs_config = observe::Config::new(
        &args.log_filter,
        args.log_stderr_threshold,
        args.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    tracing::info!("running token deployer with validated arguments:\n{}", args);

    let summary = token_deployer::run(args).await?;
    if summary.failed > 0 {
        tracing::warn!(%summary, "some deployments failed");
    }
    Ok(())
}
