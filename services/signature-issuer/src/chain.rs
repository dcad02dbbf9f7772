//! Chain id resolution.
//!
//! The chain id is read from configuration or asked from a JSON-RPC node
//! with `eth_chainId`. When both are available they must agree.

use allowlist_core::config::ChainConfig;
use allowlist_core::InputError;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

fn rpc_failure(reason: impl Into<String>) -> InputError {
    InputError::InvalidParameter {
        name: "chain.rpc_url",
        reason: reason.into(),
    }
}

/// Queries `eth_chainId` on `rpc_url`.
pub async fn fetch_chain_id(client: &reqwest::Client, rpc_url: &str) -> Result<u64, InputError> {
    let response = client
        .post(rpc_url)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_chainId",
            "params": [],
        }))
        .send()
        .await
        .map_err(|e| rpc_failure(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(rpc_failure(format!("node answered with status {}", status)));
    }

    let body: RpcResponse = response
        .json()
        .await
        .map_err(|e| rpc_failure(e.to_string()))?;

    if let Some(error) = body.error {
        return Err(rpc_failure(format!("{} ({})", error.message, error.code)));
    }
    let result = body
        .result
        .ok_or_else(|| rpc_failure("eth_chainId returned no result"))?;
    parse_quantity(&result)
}

/// Parses a JSON-RPC hex quantity such as `0x5`.
pub fn parse_quantity(quantity: &str) -> Result<u64, InputError> {
    let digits = quantity
        .strip_prefix("0x")
        .ok_or_else(|| rpc_failure(format!("'{}' is not a hex quantity", quantity)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| rpc_failure(format!("'{}' is not a hex quantity: {}", quantity, e)))
}

/// Resolves the chain id from configuration and, if configured, the node.
pub async fn resolve_chain_id(config: &ChainConfig) -> Result<u64, InputError> {
    let Some(rpc_url) = config.rpc_url.as_deref() else {
        return config
            .chain_id
            .ok_or(InputError::MissingParameter("chain.chain_id"));
    };

    let client = reqwest::Client::new();
    let remote = fetch_chain_id(&client, rpc_url).await?;

    match config.chain_id {
        Some(configured) if configured != remote => Err(InputError::InvalidParameter {
            name: "chain.chain_id",
            reason: format!(
                "configured chain id {} does not match node chain id {}",
                configured, remote
            ),
        }),
        _ => Ok(remote),
    }
}
