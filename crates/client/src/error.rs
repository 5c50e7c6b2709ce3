use crate::approval::GrantedApproval;
use dex_data::AddressBookError;
use dex_domain::error::ParseError;
use dex_domain::token::TokenAmount;
use dex_protocols::error::ChainError;
use thiserror::Error;

/// Failures surfaced by [`DexClient`](crate::client::DexClient) operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A user-entered amount or tolerance could not be parsed.
    #[error("invalid input: {0}")]
    Parse(#[from] ParseError),

    /// The pool could not price the request.
    #[error("quote unavailable: {0}")]
    QuoteUnavailable(String),

    /// A state or metadata read failed. Cached state is left as it was.
    #[error("pool state unavailable: {0}")]
    StateUnavailable(#[source] ChainError),

    /// An approval was rejected; the action was never submitted.
    #[error("approval of {symbol} failed: {source}")]
    ApprovalFailed {
        symbol: String,
        /// Approvals that went through before the failing one.
        granted: Vec<GrantedApproval>,
        #[source]
        source: ChainError,
    },

    /// Approvals succeeded but the action itself failed.
    ///
    /// Granted allowances are not revoked.
    #[error("{action} failed after {} approval(s): {source}", .approvals.len())]
    ActionFailed {
        action: &'static str,
        approvals: Vec<GrantedApproval>,
        #[source]
        source: ChainError,
    },

    /// The wallet exposes no account.
    #[error("no wallet account connected")]
    NotConnected,

    /// Removal of more shares than the account holds.
    #[error("requested {requested} liquidity shares but only {held} are held")]
    InsufficientShares {
        requested: TokenAmount,
        held: TokenAmount,
    },
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    AddressBook(#[from] AddressBookError),
}
