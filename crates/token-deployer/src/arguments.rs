use {
    clap::Parser,
    std::{
        fmt::{self, Display, Formatter},
        num::NonZeroUsize,
        path::PathBuf,
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(Parser)]
#[clap(about = "Deploys a batch of freshly named token contracts")]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env)]
    pub rpc_url: Url,

    /// Hex encoded private key of the deploying account.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: String,

    /// JSON ABI of the token contract.
    #[clap(long, env, default_value = "Token_abi.json")]
    pub abi_path: PathBuf,

    /// Hex encoded creation bytecode of the token contract.
    #[clap(long, env, default_value = "Token_bytecode.txt")]
    pub bytecode_path: PathBuf,

    /// File the deployment results are appended to.
    #[clap(long, env, default_value = "logs.txt")]
    pub audit_log_path: PathBuf,

    /// Number of tokens to deploy. Asked for interactively when missing.
    #[clap(long, env = "DEPLOY_COUNT")]
    pub count: Option<NonZeroUsize>,

    /// Gas price in Gwei used for every deployment. Asked for interactively
    /// when missing.
    #[clap(long, env)]
    pub gas_price_gwei: Option<String>,

    /// How long to wait for a deployment to be mined before counting it as
    /// failed.
    #[clap(long, env, default_value = "18s", value_parser = humantime::parse_duration)]
    pub confirmation_timeout: Duration,

    #[clap(long, env, default_value = "1s", value_parser = humantime::parse_duration)]
    pub receipt_poll_interval: Duration,

    /// Pause after every deployment.
    #[clap(long, env, default_value = "5s", value_parser = humantime::parse_duration)]
    pub deployment_delay: Duration,

    #[clap(long, env, default_value = "warn,token_deployer=info,ethrpc=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            rpc_url,
            private_key: _,
            abi_path,
            bytecode_path,
            audit_log_path,
            count,
            gas_price_gwei,
            confirmation_timeout,
            receipt_poll_interval,
            deployment_delay,
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "rpc_url: {rpc_url}")?;
        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "abi_path: {}", abi_path.display())?;
        writeln!(f, "bytecode_path: {}", bytecode_path.display())?;
        writeln!(f, "audit_log_path: {}", audit_log_path.display())?;
        display_option(f, "count", count)?;
        display_option(f, "gas_price_gwei", gas_price_gwei)?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        writeln!(f, "receipt_poll_interval: {receipt_poll_interval:?}")?;
        writeln!(f, "deployment_delay: {deployment_delay:?}")?;
        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

fn display_option(
    f: &mut Formatter<'_>,
    name: &str,
    option: &Option<impl Display>,
) -> fmt::Result {
    write!(f, "{name}: ")?;
    match option {
        Some(display) => writeln!(f, "{display}"),
        None => writeln!(f, "None"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from([
            "token-deployer",
            "--rpc-url",
            "http://localhost:8545",
            "--private-key",
            KEY,
        ])
        .unwrap();

        assert_eq!(args.abi_path, PathBuf::from("Token_abi.json"));
        assert_eq!(args.bytecode_path, PathBuf::from("Token_bytecode.txt"));
        assert_eq!(args.audit_log_path, PathBuf::from("logs.txt"));
        assert_eq!(args.confirmation_timeout, Duration::from_secs(18));
        assert_eq!(args.receipt_poll_interval, Duration::from_secs(1));
        assert_eq!(args.deployment_delay, Duration::from_secs(5));
        assert_eq!(args.log_stderr_threshold, LevelFilter::ERROR);
        assert!(!args.use_json_logs);
    }

    #[test]
    fn parses_batch_parameters() {
        let args = Arguments::try_parse_from([
            "token-deployer",
            "--rpc-url",
            "http://localhost:8545",
            "--private-key",
            KEY,
            "--count",
            "4",
            "--gas-price-gwei",
            "1.5",
            "--confirmation-timeout",
            "1m 30s",
            "--deployment-delay",
            "500ms",
        ])
        .unwrap();

        assert_eq!(args.count, NonZeroUsize::new(4));
        assert_eq!(args.gas_price_gwei.as_deref(), Some("1.5"));
        assert_eq!(args.confirmation_timeout, Duration::from_secs(90));
        assert_eq!(args.deployment_delay, Duration::from_millis(500));
    }

    #[test]
    fn rejects_zero_count() {
        assert!(
            Arguments::try_parse_from([
                "token-deployer",
                "--rpc-url",
                "http://localhost:8545",
                "--private-key",
                KEY,
                "--count",
                "0",
            ])
            .is_err()
        );
    }

    #[test]
    fn display_hides_private_key() {
        let args = Arguments::try_parse_from([
            "token-deployer",
            "--rpc-url",
            "http://localhost:8545",
            "--private-key",
            KEY,
        ])
        .unwrap();

        let displayed = args.to_string();
        assert!(displayed.contains("private_key: SECRET"));
        assert!(displayed.contains("count: None"));
        assert!(!displayed.contains(KEY.trim_start_matches("0x")));
    }
}
