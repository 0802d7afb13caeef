use alloy_primitives::{hex, Address};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Minimal JSON-RPC client for an EVM endpoint.
///
/// One instance per endpoint; request ids come from a process-local counter.
/// Requests are sent once, with no retry, fallback, or timeout; any failure
/// surfaces as an [`Error::EvmRpc`].
pub struct EvmProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl EvmProvider {
    pub fn new(url: String) -> Self {
        info!("Initializing EVM provider with RPC endpoint: {}", url);

        Self {
            client: reqwest::Client::new(),
            url,
            next_id: AtomicU64::new(1),
        }
    }

    /// Send a single JSON-RPC request and return its `result` value.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!("Sending {} request to {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::EvmRpc(format!("Failed to send RPC request: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::EvmRpc(format!(
                "RPC request failed with status: {}",
                response.status()
            )));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| Error::EvmRpc(format!("Failed to parse RPC response: {}", e)))?;

        if let Some(err) = body.error {
            return Err(Error::EvmRpc(format!(
                "RPC error {}: {}",
                err.code, err.message
            )));
        }

        body.result
            .ok_or_else(|| Error::EvmRpc("RPC response missing result".to_string()))
    }

    /// Read-only `eth_call` against `to` at the latest block, returning the
    /// raw return data.
    pub async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let params = json!([
            {
                "to": to.to_string(),
                "data": hex::encode_prefixed(&data),
            },
            "latest"
        ]);

        let result = self.request("eth_call", params).await?;

        let return_hex = result
            .as_str()
            .ok_or_else(|| Error::EvmRpc("eth_call result is not a string".to_string()))?;

        hex::decode(return_hex)
            .map_err(|e| Error::EvmRpc(format!("Invalid return data hex: {}", e)))
    }
}
