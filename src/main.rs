//! tokencheck - token-list metadata validator
//!
//! Fetches a published token list and checks each entry's decimals against
//! the value read on chain, in batched lookups that tolerate partial
//! failure. Exits non-zero when any mismatch was found.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tokencheck::utils::logging;
use tokencheck::{AggregationConfig, Aggregator, Config, JsonRpcExecutor, checker, tokenlist};

#[derive(Parser, Debug)]
#[command(name = "tokencheck", version, about = "Validate token-list metadata against on-chain values")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "TOKENCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Token list URL (overrides config)
    #[arg(long)]
    list_url: Option<String>,

    /// JSON-RPC endpoint (overrides config)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Calls per batch request (overrides config)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    info!(version = tokencheck::VERSION, "starting tokencheck");

    match run(cli).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(mismatches) => {
            eprintln!("{} mismatching entries found", mismatches);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<usize> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };
    if let Some(url) = cli.list_url {
        config.list_url = url;
    }
    if let Some(url) = cli.rpc_url {
        config.rpc_url = url;
    }
    if let Some(size) = cli.chunk_size {
        config.chunk_size = size;
    }
    config.validate()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .context("failed to build HTTP client")?;

    let list = tokenlist::fetch_list(&client, &config.list_url, &config.excluded_tokens)
        .await
        .context("failed to fetch token list")?;

    let executor = JsonRpcExecutor::new(client, &config.rpc_url)?;
    let aggregator = Aggregator::new(
        AggregationConfig::new(config.default_decimals)
            .with_chunk_size(config.chunk_size)
            .with_concurrency(config.concurrency)
            .with_timeout(Duration::from_secs(config.timeout)),
    );

    let mismatches = checker::check_list(&list, &aggregator, &executor).await?;
    Ok(mismatches.len())
}
