//! # tokencheck
//!
//! Validates a published token list against ground-truth values read from
//! the chain, reporting entries whose metadata disagrees.
//!
//! The interesting part lives in [`core`]: a batched, partial-failure-
//! tolerant aggregation engine that groups many independent lookups into a
//! few executor calls and substitutes a caller-supplied default for anything
//! that cannot be resolved, while keeping results index-aligned with the
//! input. Everything else is glue around it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tokencheck::{AggregationConfig, Aggregator, EthCall, JsonRpcExecutor};
//!
//! # async fn example() -> tokencheck::Result<()> {
//! let client = reqwest::Client::new();
//! let executor = JsonRpcExecutor::new(client, "https://cloudflare-eth.com")?;
//!
//! let aggregator = Aggregator::new(
//!     AggregationConfig::new(18u32)
//!         .with_chunk_size(50)
//!         .with_concurrency(4),
//! );
//!
//! let calls: Vec<EthCall> = Vec::new();
//! let decimals = aggregator.aggregate(&calls, &executor).await?;
//! assert_eq!(decimals.len(), calls.len());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod checker;
pub mod config;
pub mod core;
pub mod rpc;
pub mod tokenlist;
pub mod utils;

// Re-export main types
pub use checker::{Mismatch, check_decimals, check_list};
pub use config::Config;
pub use rpc::{EthCall, JsonRpcExecutor};
pub use self::core::{AggregationConfig, Aggregator, BatchExecutor, CallResult, chunk};
pub use tokenlist::{Token, TokenList, fetch_list};
pub use utils::error::{CheckerError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
