//! Calls, receipts and the two capabilities the client consumes.

use crate::abi::Selector;
use crate::error::ChainError;
use alloy::primitives::{Bytes, TxHash};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use dex_domain::address::Address;
use serde::{Deserialize, Serialize};

/// A contract invocation: target plus ABI calldata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Contract address.
    pub to: Address,
    /// Selector and encoded arguments.
    pub data: Bytes,
    /// Method name, for logs and errors.
    pub label: &'static str,
}

impl ContractCall {
    /// Encodes `call` against the contract at `to`.
    #[must_use]
    pub fn encode<C: SolCall>(to: Address, call: &C) -> Self {
        let label = C::SIGNATURE.split('(').next().unwrap_or(C::SIGNATURE);
        Self {
            to,
            data: call.abi_encode().into(),
            label,
        }
    }

    /// First four bytes of the calldata.
    #[must_use]
    pub fn selector(&self) -> Option<Selector> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block that included the transaction.
    pub block_number: u64,
    /// Whether execution succeeded.
    pub success: bool,
    /// Gas consumed.
    pub gas_used: u64,
}

/// Read-only access to contract state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Executes `call` against the latest state and returns the raw return data.
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError>;
}

/// The account capability injected by the caller.
///
/// Implementations own signing, broadcasting and inclusion waiting; the
/// client only sequences calls.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// The connected account, if any.
    fn account(&self) -> Option<Address>;

    /// Submits `call` from the connected account and waits for inclusion.
    ///
    /// # Errors
    /// Returns [`ChainError::Reverted`] when the transaction is mined but fails.
    async fn submit(&self, call: ContractCall) -> Result<TransactionReceipt, ChainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::ISimpleDex;
    use dex_domain::address::from_index;

    #[test]
    fn test_encode_labels_with_method_name() {
        let call = ContractCall::encode(
            from_index(7),
            &ISimpleDex::liquidityCall {
                provider: from_index(9),
            },
        );
        assert_eq!(call.label, "liquidity");
        assert_eq!(call.data.len(), 36);
        assert_eq!(call.selector(), Some(ISimpleDex::liquidityCall::SELECTOR));
    }
}
