//! Configuration validation

use url::Url;

use super::Config;
use crate::utils::error::{CheckerError, Result};

fn validate_http_url(url_str: &str, context: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| CheckerError::Config(format!("{} has invalid URL format: {}", context, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(CheckerError::Config(format!(
            "{} must use http:// or https:// scheme, got: {}",
            context, scheme
        ))),
    }
}

impl Config {
    /// Validate the configuration before any network work starts.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(CheckerError::InvalidConfiguration(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        if self.timeout == 0 {
            return Err(CheckerError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }
        validate_http_url(&self.list_url, "list_url")?;
        validate_http_url(&self.rpc_url, "rpc_url")?;
        Ok(())
    }
}
