use {
    crate::{address::DEFAULT_LEGACY_PREFIX, envelope::Id},
    alloy_eips::BlockNumberOrTag,
    clap::Parser,
    std::{
        fmt::{self, Display, Formatter},
        net::SocketAddr,
        time::Duration,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(Debug, Parser)]
pub struct Arguments {
    #[clap(long, env, default_value = "warn,oracle_watcher=debug,observe=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Output log events as JSON.
    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub use_json_logs: bool,

    /// Address the trigger endpoint listens on.
    #[clap(long, env, default_value = "0.0.0.0:5100")]
    pub bind_address: SocketAddr,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Timeout for a single request to the node.
    #[clap(long, env, default_value = "10s", value_parser = humantime::parse_duration)]
    pub http_timeout: Duration,

    /// Time to wait between two polling cycles.
    #[clap(long, env, default_value = "2s", value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,

    /// Job whose oracle requests are watched.
    #[clap(long, env, default_value = "c3d9861a75b945888e14b37e406cd85f")]
    pub job_id: String,

    /// Oracle contracts emitting the requests. Accepts `0x` and legacy
    /// prefixed addresses.
    #[clap(
        long,
        env,
        value_delimiter = ',',
        default_value = "0xA847a7b737e2414Fc6BEef7A1eF05aE446206B52"
    )]
    pub oracle_addresses: Vec<String>,

    /// Chain specific address prefix that gets replaced by `0x`.
    #[clap(long, env, default_value = DEFAULT_LEGACY_PREFIX)]
    pub legacy_address_prefix: String,

    /// First block to search. A `0x` prefixed number or a tag like
    /// `earliest`.
    #[clap(long, env, default_value = "0x2a922c1")]
    pub from_block: BlockNumberOrTag,

    /// Last block to search. A `0x` prefixed number or a tag like `latest`.
    #[clap(long, env, default_value = "latest")]
    pub to_block: BlockNumberOrTag,

    /// JSON-RPC id sent with every request.
    #[clap(long, env, default_value = "1")]
    pub request_id: u64,
}

impl Arguments {
    pub fn request_id(&self) -> Id {
        Id::from(self.request_id)
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
            bind_address,
            node_url,
            http_timeout,
            poll_interval,
            job_id,
            oracle_addresses,
            legacy_address_prefix,
            from_block,
            to_block,
            request_id,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        writeln!(f, "bind_address: {bind_address}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "http_timeout: {http_timeout:?}")?;
        writeln!(f, "poll_interval: {poll_interval:?}")?;
        writeln!(f, "job_id: {job_id}")?;
        writeln!(f, "oracle_addresses: {oracle_addresses:?}")?;
        writeln!(f, "legacy_address_prefix: {legacy_address_prefix}")?;
        writeln!(f, "from_block: {from_block}")?;
        writeln!(f, "to_block: {to_block}")?;
        writeln!(f, "request_id: {request_id}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_watch_the_hardcoded_job() {
        let args = Arguments::try_parse_from(["oracle-watcher"]).unwrap();

        assert_eq!(args.job_id, "c3d9861a75b945888e14b37e406cd85f");
        assert_eq!(
            args.oracle_addresses,
            vec!["0xA847a7b737e2414Fc6BEef7A1eF05aE446206B52".to_string()]
        );
        assert_eq!(args.from_block, BlockNumberOrTag::Number(0x2a922c1));
        assert_eq!(args.to_block, BlockNumberOrTag::Latest);
        assert_eq!(args.poll_interval, Duration::from_secs(2));
        assert_eq!(args.request_id(), Id::default());
    }

    #[test]
    fn parses_overrides() {
        let args = Arguments::try_parse_from([
            "oracle-watcher",
            "--oracle-addresses",
            "xdc1111111111111111111111111111111111111111,0x2222222222222222222222222222222222222222",
            "--from-block",
            "earliest",
            "--to-block",
            "finalized",
            "--poll-interval",
            "500ms",
        ])
        .unwrap();

        assert_eq!(args.oracle_addresses.len(), 2);
        assert_eq!(args.from_block, BlockNumberOrTag::Earliest);
        assert_eq!(args.to_block, BlockNumberOrTag::Finalized);
        assert_eq!(args.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn rejects_bad_block_numbers() {
        assert!(Arguments::try_parse_from(["oracle-watcher", "--to-block", "tomorrow"]).is_err());
        assert!(Arguments::try_parse_from(["oracle-watcher", "--from-block", "100"]).is_err());
    }
}
