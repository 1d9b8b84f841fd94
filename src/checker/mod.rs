//! Token-list validation workflow
//!
//! Compares each token's published metadata against ground truth read from
//! the chain through the aggregation engine. Lookups that cannot be answered
//! fall back to the configured default, so every entry is still compared.

use std::fmt;

use tracing::{error, info};

use crate::core::{Aggregator, BatchExecutor};
use crate::rpc::EthCall;
use crate::tokenlist::TokenList;
use crate::utils::error::Result;

/// 4-byte selector for `decimals()`
pub const DECIMALS_SELECTOR: &str = "0x313ce567";

/// A token whose published decimals disagree with the on-chain value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Contract address
    pub address: String,
    /// Ticker symbol
    pub symbol: String,
    /// Value read from the chain (or the default when unresolved)
    pub expected: u32,
    /// Value published in the list
    pub actual: u32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrong decimals for {}, expected {}, actual {}",
            self.address, self.expected, self.actual
        )
    }
}

/// Run every check against the list. Currently: decimals.
pub async fn check_list<E>(
    list: &TokenList,
    aggregator: &Aggregator<u32>,
    executor: &E,
) -> Result<Vec<Mismatch>>
where
    E: BatchExecutor<EthCall, u32> + ?Sized,
{
    check_decimals(list, aggregator, executor).await
}

/// Validate published decimals against `decimals()` read on chain.
///
/// Returns one [`Mismatch`] per disagreeing entry, in list order. Entries
/// whose lookup stayed unresolved are compared against the aggregator's
/// default value.
pub async fn check_decimals<E>(
    list: &TokenList,
    aggregator: &Aggregator<u32>,
    executor: &E,
) -> Result<Vec<Mismatch>>
where
    E: BatchExecutor<EthCall, u32> + ?Sized,
{
    let calls: Vec<EthCall> = list
        .tokens
        .iter()
        .map(|token| EthCall {
            to: token.address.clone(),
            data: DECIMALS_SELECTOR.to_string(),
        })
        .collect();

    info!(tokens = calls.len(), "checking decimals");
    let onchain = aggregator.aggregate(&calls, executor).await?;

    let mut mismatches = Vec::new();
    for (token, &onchain_decimals) in list.tokens.iter().zip(onchain.iter()) {
        if token.decimals != onchain_decimals {
            let mismatch = Mismatch {
                address: token.address.clone(),
                symbol: token.symbol.clone(),
                expected: onchain_decimals,
                actual: token.decimals,
            };
            error!("{}", mismatch);
            mismatches.push(mismatch);
        }
    }

    info!(
        checked = list.tokens.len(),
        mismatches = mismatches.len(),
        "decimals check finished"
    );
    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AggregationConfig, CallResult};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Resolves decimals from a fixed address map; unknown addresses stay
    /// unresolved.
    struct MapExecutor {
        decimals: HashMap<String, u32>,
    }

    #[async_trait]
    impl BatchExecutor<EthCall, u32> for MapExecutor {
        async fn execute_batch(&self, batch: &[EthCall]) -> crate::Result<Vec<CallResult<u32>>> {
            Ok(batch
                .iter()
                .map(|call| self.decimals.get(&call.to).copied().into())
                .collect())
        }
    }

    fn list() -> TokenList {
        serde_json::from_str(
            r#"{
                "name": "Sample",
                "tokens": [
                    {"address": "0xaaa", "chainId": 1, "decimals": 6, "name": "A", "symbol": "AAA"},
                    {"address": "0xbbb", "chainId": 1, "decimals": 8, "name": "B", "symbol": "BBB"},
                    {"address": "0xccc", "chainId": 1, "decimals": 18, "name": "C", "symbol": "CCC"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn reports_only_disagreeing_entries() {
        let executor = MapExecutor {
            decimals: HashMap::from([
                ("0xaaa".to_string(), 6),
                ("0xbbb".to_string(), 18),
                ("0xccc".to_string(), 18),
            ]),
        };
        let aggregator = Aggregator::new(AggregationConfig::new(18).with_chunk_size(2));

        let mismatches = check_decimals(&list(), &aggregator, &executor).await.unwrap();

        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].address, "0xbbb");
        assert_eq!(mismatches[0].expected, 18);
        assert_eq!(mismatches[0].actual, 8);
    }

    #[tokio::test]
    async fn unresolved_lookup_compares_against_default() {
        // 0xaaa is unknown to the executor: its slot becomes the default 18,
        // which disagrees with the published 6.
        let executor = MapExecutor {
            decimals: HashMap::from([
                ("0xbbb".to_string(), 8),
                ("0xccc".to_string(), 18),
            ]),
        };
        let aggregator = Aggregator::new(AggregationConfig::new(18));

        let mismatches = check_decimals(&list(), &aggregator, &executor).await.unwrap();

        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].address, "0xaaa");
        assert_eq!(mismatches[0].expected, 18);
    }

    #[tokio::test]
    async fn builds_decimals_calldata() {
        struct CaptureExecutor;

        #[async_trait]
        impl BatchExecutor<EthCall, u32> for CaptureExecutor {
            async fn execute_batch(
                &self,
                batch: &[EthCall],
            ) -> crate::Result<Vec<CallResult<u32>>> {
                for call in batch {
                    assert_eq!(call.data, DECIMALS_SELECTOR);
                }
                Ok(batch.iter().map(|_| CallResult::Resolved(18)).collect())
            }
        }

        let aggregator = Aggregator::new(AggregationConfig::new(18));
        let mismatches = check_decimals(&list(), &aggregator, &CaptureExecutor)
            .await
            .unwrap();

        // Published 6 and 8 disagree with the uniform 18.
        assert_eq!(mismatches.len(), 2);
    }
}
