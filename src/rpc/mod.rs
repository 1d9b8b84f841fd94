//! JSON-RPC batch executor
//!
//! Concrete [`BatchExecutor`] binding that resolves a batch of `eth_call`
//! descriptors in one JSON-RPC 2.0 batch request. Request ids are the
//! positions within the batch, so responses can be matched back to their
//! slots regardless of the order the node returns them in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::core::{BatchExecutor, CallResult};
use crate::utils::error::{CheckerError, Result};

/// One read-only contract call
#[derive(Debug, Clone)]
pub struct EthCall {
    /// Target contract address, 0x-prefixed hex
    pub to: String,
    /// ABI-encoded calldata, 0x-prefixed hex
    pub data: String,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: usize,
    method: &'static str,
    params: (CallParams<'a>, &'static str),
}

#[derive(Serialize)]
struct CallParams<'a> {
    to: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    id: usize,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Executor that resolves [`EthCall`] batches against a JSON-RPC node
pub struct JsonRpcExecutor {
    client: reqwest::Client,
    endpoint: Url,
}

impl JsonRpcExecutor {
    /// Create an executor for the given node endpoint.
    ///
    /// Fails with a configuration error when the endpoint is not a valid
    /// http(s) URL.
    pub fn new(client: reqwest::Client, endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CheckerError::Config(format!("invalid RPC endpoint: {}", e)))?;
        match endpoint.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(CheckerError::Config(format!(
                    "RPC endpoint must use http:// or https://, got: {}",
                    scheme
                )));
            }
        }
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl BatchExecutor<EthCall, u32> for JsonRpcExecutor {
    async fn execute_batch(&self, batch: &[EthCall]) -> Result<Vec<CallResult<u32>>> {
        let payload: Vec<RpcRequest<'_>> = batch
            .iter()
            .enumerate()
            .map(|(id, call)| RpcRequest {
                jsonrpc: "2.0",
                id,
                method: "eth_call",
                params: (
                    CallParams {
                        to: &call.to,
                        data: &call.data,
                    },
                    "latest",
                ),
            })
            .collect();

        let body = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let responses: Vec<RpcResponse> = serde_json::from_slice(&body)?;

        let mut slots: Vec<CallResult<u32>> = vec![CallResult::Unresolved; batch.len()];
        for response in responses {
            if response.id >= slots.len() {
                return Err(CheckerError::Rpc(format!(
                    "response id {} out of range for batch of {}",
                    response.id,
                    slots.len()
                )));
            }
            if let Some(err) = response.error {
                debug!(id = response.id, code = err.code, message = %err.message, "call errored");
                continue;
            }
            slots[response.id] = response.result.as_deref().and_then(decode_uint).into();
        }

        Ok(slots)
    }
}

/// Decode a 0x-prefixed ABI word into a `u32`.
///
/// Returns `None` for empty results (`0x`), non-hex input, or values that do
/// not fit in 32 bits.
fn decode_uint(word: &str) -> Option<u32> {
    let raw = word.strip_prefix("0x")?;
    if raw.is_empty() {
        return None;
    }
    let owned;
    let even = if raw.len() % 2 == 1 {
        owned = format!("0{}", raw);
        owned.as_str()
    } else {
        raw
    };
    let bytes = hex::decode(even).ok()?;
    let split = bytes.len().saturating_sub(4);
    if bytes[..split].iter().any(|&b| b != 0) {
        return None;
    }
    Some(
        bytes[split..]
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_abi_word() {
        let word = "0x0000000000000000000000000000000000000000000000000000000000000012";
        assert_eq!(decode_uint(word), Some(18));
    }

    #[test]
    fn decodes_short_words() {
        assert_eq!(decode_uint("0x06"), Some(6));
        assert_eq!(decode_uint("0x6"), Some(6));
        assert_eq!(decode_uint("0x0"), Some(0));
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert_eq!(decode_uint("0x"), None);
        assert_eq!(decode_uint("12"), None);
        assert_eq!(decode_uint("0xzz"), None);
    }

    #[test]
    fn rejects_values_wider_than_u32() {
        let word = "0x0000000000000000000000000000000000000000000000000000000100000000";
        assert_eq!(decode_uint(word), None);
    }

    #[test]
    fn batch_payload_shape() {
        let call = EthCall {
            to: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            data: "0x313ce567".to_string(),
        };
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallParams {
                    to: &call.to,
                    data: &call.data,
                },
                "latest",
            ),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 1);
        assert_eq!(value["method"], "eth_call");
        assert_eq!(value["params"][0]["to"], call.to);
        assert_eq!(value["params"][0]["data"], call.data);
        assert_eq!(value["params"][1], "latest");
    }

    #[test]
    fn malformed_envelope_maps_to_serialization_error() {
        let err = serde_json::from_slice::<Vec<RpcResponse>>(b"not json").unwrap_err();
        let err = CheckerError::from(err);
        assert!(matches!(err, CheckerError::Serialization(_)));
    }

    #[test]
    fn out_of_order_ids_deserialize() {
        let body = r#"[
            {"jsonrpc": "2.0", "id": 1, "result": "0x12"},
            {"jsonrpc": "2.0", "id": 0, "error": {"code": -32000, "message": "execution reverted"}}
        ]"#;
        let responses: Vec<RpcResponse> = serde_json::from_str(body).unwrap();
        assert_eq!(responses[0].id, 1);
        assert_eq!(responses[0].result.as_deref(), Some("0x12"));
        assert!(responses[1].error.is_some());
    }
}
