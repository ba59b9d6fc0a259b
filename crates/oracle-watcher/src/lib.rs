//! Watches a node for oracle request events of a single job by polling
//! `eth_getLogs` with a filter on the event signature, the job id topic and
//! the oracle contract addresses.

pub mod address;
pub mod api;
pub mod arguments;
pub mod envelope;
pub mod errors;
pub mod filter;
pub mod poller;
pub mod shutdown;
pub mod topic;
pub mod transport;

use {
    crate::{
        address::AddressNormalizer,
        arguments::Arguments,
        filter::{FilterQueryBuilder, ORACLE_REQUEST_TOPIC},
        topic::TopicEncoder,
        transport::HttpTransport,
    },
    anyhow::{Context, Result},
    clap::Parser,
    std::sync::Arc,
};

const USER_AGENT: &str = "oracle-watcher/0.1.0";

pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    let obs_config = observe::Config::new(
        &args.log_filter,
        args.log_stderr_threshold,
        args.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    tracing::info!("running oracle watcher with validated arguments:\n{}", args);
    if let Err(err) = run(args).await {
        tracing::error!(?err, "oracle watcher failed");
        std::process::exit(1);
    }
}

pub async fn run(args: Arguments) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(args.http_timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to create HTTP client")?;
    let transport = HttpTransport::new(client, args.node_url.clone(), "node".to_string());

    let watch = api::Watch {
        builder: FilterQueryBuilder::new(
            ORACLE_REQUEST_TOPIC,
            TopicEncoder::default(),
            AddressNormalizer::new(args.legacy_address_prefix.clone()),
        ),
        request_id: args.request_id(),
        job_id: args.job_id,
        addresses: args.oracle_addresses,
        from_block: Some(args.from_block),
        to_block: Some(args.to_block),
        interval: args.poll_interval,
        transport: Arc::new(transport),
    };
    // Fail at startup rather than on the first trigger.
    watch
        .request()
        .context("invalid job id or oracle addresses")?;

    let listener = tokio::net::TcpListener::bind(args.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", args.bind_address))?;
    api::serve(listener, shutdown::signal_handler(), watch)
        .await
        .context("trigger endpoint failed")
}
