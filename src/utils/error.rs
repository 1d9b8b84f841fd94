//! Error handling for the checker
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the checker
pub type Result<T> = std::result::Result<T, CheckerError>;

/// Main error type for the checker
#[derive(Error, Debug)]
pub enum CheckerError {
    /// Configuration errors (unreadable file, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid aggregation parameters (bad chunk size); programmer error,
    /// surfaced immediately and never retried
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RPC errors (malformed envelope, bad endpoint response)
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),
}
