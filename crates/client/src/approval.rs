use dex_domain::address::Address;
use dex_domain::quote::Quote;
use dex_domain::token::{Token, TokenAmount};
use dex_protocols::chain::TransactionReceipt;
use serde::{Deserialize, Serialize};

/// An allowance to grant before an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    pub token: Token,
    pub spender: Address,
    pub amount: TokenAmount,
}

impl Approval {
    pub fn new(token: Token, spender: Address, amount: TokenAmount) -> Self {
        Self {
            token,
            spender,
            amount,
        }
    }
}

/// An approval that was mined successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedApproval {
    pub approval: Approval,
    pub receipt: TransactionReceipt,
    /// Allowance read back after the action failed, when the read succeeded.
    pub remaining_allowance: Option<TokenAmount>,
}

/// Receipts of an approve-then-act sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub approvals: Vec<GrantedApproval>,
    pub receipt: TransactionReceipt,
}

/// A completed swap together with the quote it was protected by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub quote: Quote,
    pub execution: Execution,
}
