use serde::{Deserialize, Serialize};

/// Transport policy for the JSON-RPC provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Node HTTP endpoint.
    pub url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Delay between receipt polls in milliseconds.
    pub receipt_poll_interval_ms: u64,
    /// How long to wait for a broadcast transaction to be mined.
    pub receipt_timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            request_timeout_secs: 30,
            receipt_poll_interval_ms: 1000,
            receipt_timeout_secs: 120,
        }
    }
}
