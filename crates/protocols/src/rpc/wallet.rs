use super::RpcProvider;
use crate::chain::{ContractCall, TransactionReceipt, Wallet};
use crate::error::{ChainError, RpcError};
use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use dex_domain::address::Address;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Wallet backed by an account the node unlocks (dev nodes such as hardhat).
///
/// Transactions go out through `eth_sendTransaction`; the node fills in gas
/// and signs.
pub struct NodeWallet {
    provider: Arc<RpcProvider>,
    account: Address,
}

impl NodeWallet {
    /// Uses `account` for every submission.
    pub fn new(provider: Arc<RpcProvider>, account: Address) -> Self {
        Self { provider, account }
    }

    /// Uses the first account the node exposes.
    ///
    /// # Errors
    /// Returns [`ChainError::NoAccount`] when the node manages no accounts.
    pub async fn connect(provider: Arc<RpcProvider>) -> Result<Self, ChainError> {
        let account = provider
            .accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(ChainError::NoAccount)?;
        info!(account = %account, "Connected node account");
        Ok(Self::new(provider, account))
    }
}

#[async_trait]
impl Wallet for NodeWallet {
    fn account(&self) -> Option<Address> {
        Some(self.account)
    }

    async fn submit(&self, call: ContractCall) -> Result<TransactionReceipt, ChainError> {
        let label = call.label;
        let request = TransactionRequest::default()
            .with_from(self.account)
            .with_to(call.to)
            .with_input(call.data);

        let pending = self
            .provider
            .inner()
            .send_transaction(request)
            .await
            .map_err(|e| {
                if let Some(payload) = e.as_error_resp() {
                    return ChainError::Rejected {
                        label,
                        reason: payload.message.to_string(),
                    };
                }
                RpcError::from(e).into()
            })?;
        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, to = %call.to, method = label, "Transaction sent");

        let timeout = Duration::from_secs(self.provider.config().receipt_timeout_secs);
        let receipt = pending
            .with_timeout(Some(timeout))
            .get_receipt()
            .await
            .map_err(|source| RpcError::Receipt { tx_hash, source })?;
        let block_number = receipt.block_number().unwrap_or_default();

        if !receipt.status() {
            warn!(tx_hash = %tx_hash, method = label, block_number, "Transaction reverted");
            return Err(ChainError::Reverted {
                label,
                tx_hash,
                reason: "execution reverted".to_string(),
            });
        }

        info!(tx_hash = %tx_hash, block = block_number, method = label, "Transaction confirmed");
        Ok(TransactionReceipt {
            tx_hash,
            block_number,
            success: true,
            gas_used: receipt.gas_used(),
        })
    }
}
