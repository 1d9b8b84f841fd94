//! Configuration management
//!
//! Loads checker settings from a YAML file, applies environment-variable
//! overrides, and validates the result before anything touches the network.

pub mod validation;

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::error::{CheckerError, Result};

fn default_list_url() -> String {
    "https://tokens.coingecko.com/all.json".to_string()
}

fn default_rpc_url() -> String {
    "https://cloudflare-eth.com".to_string()
}

fn default_chunk_size() -> usize {
    50
}

fn default_decimals() -> u32 {
    18
}

fn default_concurrency() -> usize {
    1
}

fn default_timeout() -> u64 {
    30
}

/// Checker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL of the token list to validate
    #[serde(default = "default_list_url")]
    pub list_url: String,
    /// JSON-RPC node endpoint
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Maximum calls per batch request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Fallback decimals for unresolved lookups
    #[serde(default = "default_decimals")]
    pub default_decimals: u32,
    /// Batches in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-batch timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Additional token addresses to exclude from checking
    #[serde(default)]
    pub excluded_tokens: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_url: default_list_url(),
            rpc_url: default_rpc_url(),
            chunk_size: default_chunk_size(),
            default_decimals: default_decimals(),
            concurrency: default_concurrency(),
            timeout: default_timeout(),
            excluded_tokens: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, then apply env overrides and
    /// validate.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.apply_env()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults plus environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TOKENCHECK_*` environment-variable overrides.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = env::var("TOKENCHECK_LIST_URL") {
            self.list_url = url;
        }
        if let Ok(url) = env::var("TOKENCHECK_RPC_URL") {
            self.rpc_url = url;
        }
        if let Ok(size) = env::var("TOKENCHECK_CHUNK_SIZE") {
            self.chunk_size = size
                .parse()
                .map_err(|e| CheckerError::Config(format!("Invalid chunk size: {}", e)))?;
        }
        if let Ok(concurrency) = env::var("TOKENCHECK_CONCURRENCY") {
            self.concurrency = concurrency
                .parse()
                .map_err(|e| CheckerError::Config(format!("Invalid concurrency: {}", e)))?;
        }
        if let Ok(timeout) = env::var("TOKENCHECK_TIMEOUT") {
            self.timeout = timeout
                .parse()
                .map_err(|e| CheckerError::Config(format!("Invalid timeout: {}", e)))?;
        }
        Ok(())
    }
}
