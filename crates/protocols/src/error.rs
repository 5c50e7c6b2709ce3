use alloy::primitives::TxHash;
use alloy::providers::PendingTransactionError;
use alloy::transports::TransportError;
use dex_domain::address::Address;
use thiserror::Error;

/// Node transport failures.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The configured endpoint is not a URL.
    #[error("invalid rpc url {url:?}: {reason}")]
    InvalidUrl {
        /// Configured endpoint.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// Request or response failure below the contract level.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// A broadcast transaction never produced a receipt.
    #[error("waiting for receipt of {tx_hash} failed: {source}")]
    Receipt {
        /// Transaction hash.
        tx_hash: TxHash,
        #[source]
        source: PendingTransactionError,
    },
}

/// Failures of chain reads and transaction submission.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Transport failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),
    /// Return data that does not match the declared interface.
    #[error("undecodable return data from {label}: {source}")]
    Abi {
        /// Method name.
        label: &'static str,
        #[source]
        source: alloy::sol_types::Error,
    },
    /// A read-only call was rejected by the contract.
    #[error("call {label} to {to} failed: {reason}")]
    CallFailed {
        /// Contract address.
        to: Address,
        /// Method name.
        label: &'static str,
        /// Revert reason or transport message.
        reason: String,
    },
    /// The node refused to broadcast a transaction.
    #[error("transaction {label} rejected: {reason}")]
    Rejected {
        /// Method name.
        label: &'static str,
        /// Node message, usually the revert found during gas estimation.
        reason: String,
    },
    /// A mined transaction reverted.
    #[error("transaction {tx_hash} ({label}) reverted: {reason}")]
    Reverted {
        /// Method name.
        label: &'static str,
        /// Transaction hash.
        tx_hash: TxHash,
        /// Revert reason, when known.
        reason: String,
    },
    /// The wallet has no account to send from.
    #[error("no account connected")]
    NoAccount,
}
