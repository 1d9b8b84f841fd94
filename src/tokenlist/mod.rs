//! Token-list retrieval
//!
//! Fetches a published token list over HTTP and drops entries from a
//! hard-coded exclusion set of addresses known to misbehave (self-destructed
//! contracts, proxies with broken metadata, the zero address).

use serde::Deserialize;
use tracing::{debug, info};

use crate::utils::error::Result;

/// Addresses excluded from checking. Lowercased for comparison.
const BROKEN_TOKENS: &[&str] = &[
    "0x2859021ee7f2cb10162e67f33af2d22764b31aff",
    "0xc16b542ff490e01fcc0dc58a60e1efdc3e357ca6",
    "0xe0b7927c4af23765cb51314a0e0521a9645f0e2a",
    "0x0af44e2784637218dd1d32a322d44e603a8f0c6a",
    "0x47140a767a861f7a1f3b0dd22a2f463421c28814",
    "0x5e3845a1d78db544613edbe43dc1ea497266d3b8",
    "0x1c5b760f133220855340003b43cc9113ec494823",
    "0x6f2afbf4f5e5e804c5b954889d7bf3768a3c9a45",
    "0x0000000000000000000000000000000000000000",
];

/// One token-list entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Contract address, 0x-prefixed hex
    pub address: String,
    /// Chain the token lives on
    pub chain_id: u64,
    /// Published decimal precision
    pub decimals: u32,
    /// Human-readable name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
}

/// A published token list
#[derive(Debug, Clone, Deserialize)]
pub struct TokenList {
    /// List name
    pub name: String,
    /// Entries, in list order
    pub tokens: Vec<Token>,
}

impl TokenList {
    /// Drop entries whose address appears in `excluded` or in the built-in
    /// broken-token set. Comparison is case-insensitive on the address.
    pub fn without_broken(mut self, excluded: &[String]) -> Self {
        let before = self.tokens.len();
        self.tokens.retain(|token| {
            let address = token.address.to_lowercase();
            !BROKEN_TOKENS.contains(&address.as_str())
                && !excluded.iter().any(|e| e.to_lowercase() == address)
        });
        let dropped = before - self.tokens.len();
        if dropped > 0 {
            debug!(dropped, "filtered excluded tokens");
        }
        self
    }
}

/// Fetch a token list and filter excluded entries.
pub async fn fetch_list(
    client: &reqwest::Client,
    url: &str,
    excluded: &[String],
) -> Result<TokenList> {
    info!(url, "fetching token list");

    let list: TokenList = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let list = list.without_broken(excluded);
    info!(name = %list.name, tokens = list.tokens.len(), "token list loaded");
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TokenList {
        serde_json::from_str(
            r#"{
                "name": "Sample",
                "tokens": [
                    {
                        "address": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                        "chainId": 1,
                        "decimals": 6,
                        "name": "USD Coin",
                        "symbol": "USDC"
                    },
                    {
                        "address": "0x2859021eE7F2Cb10162E67F33Af2D22764B31aFf",
                        "chainId": 1,
                        "decimals": 18,
                        "name": "Broken",
                        "symbol": "BRK"
                    },
                    {
                        "address": "0x0000000000000000000000000000000000000000",
                        "chainId": 1,
                        "decimals": 18,
                        "name": "Zero",
                        "symbol": "ZERO"
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let list = sample_list();
        assert_eq!(list.name, "Sample");
        assert_eq!(list.tokens[0].chain_id, 1);
        assert_eq!(list.tokens[0].decimals, 6);
        assert_eq!(list.tokens[0].symbol, "USDC");
    }

    #[test]
    fn filters_broken_tokens_case_insensitively() {
        let list = sample_list().without_broken(&[]);
        assert_eq!(list.tokens.len(), 1);
        assert_eq!(list.tokens[0].symbol, "USDC");
    }

    #[test]
    fn filters_caller_supplied_exclusions() {
        let excluded = vec!["0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string()];
        let list = sample_list().without_broken(&excluded);
        assert!(list.tokens.is_empty());
    }
}
