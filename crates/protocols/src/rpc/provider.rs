use super::RpcConfig;
use crate::chain::{ChainReader, ContractCall};
use crate::error::{ChainError, RpcError};
use alloy::network::TransactionBuilder;
use alloy::primitives::Bytes;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::ClientBuilder;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::Http;
use alloy::transports::utils::guess_local_url;
use async_trait::async_trait;
use dex_domain::address::Address;
use std::time::Duration;
use tracing::debug;

/// JSON-RPC connection to an EVM node.
pub struct RpcProvider {
    provider: DynProvider,
    config: RpcConfig,
}

impl RpcProvider {
    /// Creates a provider for `config.url`.
    ///
    /// Nothing is sent until the first request.
    ///
    /// # Errors
    /// Returns an error for a malformed URL or if the HTTP client cannot be
    /// built.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let url = config
            .url
            .parse::<reqwest::Url>()
            .map_err(|e| RpcError::InvalidUrl {
                url: config.url.clone(),
                reason: e.to_string(),
            })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let client = ClientBuilder::default()
            .transport(Http::with_client(http, url), guess_local_url(&config.url))
            .with_poll_interval(Duration::from_millis(config.receipt_poll_interval_ms));
        let provider = ProviderBuilder::new().connect_client(client).erased();

        Ok(Self { provider, config })
    }

    /// Transport policy.
    #[must_use]
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// The underlying alloy provider.
    #[must_use]
    pub fn inner(&self) -> &DynProvider {
        &self.provider
    }

    /// Accounts managed by the node.
    pub async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        Ok(self.provider.get_accounts().await?)
    }

    /// Latest block number.
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        Ok(self.provider.get_block_number().await?)
    }
}

#[async_trait]
impl ChainReader for RpcProvider {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        debug!(to = %call.to, method = call.label, "eth_call");
        let request = TransactionRequest::default()
            .with_to(call.to)
            .with_input(call.data.clone());

        self.provider.call(request).await.map_err(|e| {
            // Execution reverts come back as JSON-RPC error objects.
            if let Some(payload) = e.as_error_resp() {
                return ChainError::CallFailed {
                    to: call.to,
                    label: call.label,
                    reason: payload.message.to_string(),
                };
            }
            RpcError::from(e).into()
        })
    }
}
