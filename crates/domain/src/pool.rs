use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a swap through the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token A, buy token B.
    AToB,
    /// Sell token B, buy token A.
    BToA,
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::AToB => write!(f, "A->B"),
            SwapDirection::BToA => write!(f, "B->A"),
        }
    }
}

/// Pool-wide reserves and outstanding liquidity shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolState {
    pub reserve_a: TokenAmount,
    pub reserve_b: TokenAmount,
    pub total_liquidity: TokenAmount,
}

impl PoolState {
    /// Reserves ordered as (input, output) for a swap direction.
    #[must_use]
    pub fn reserves_for(&self, direction: SwapDirection) -> (TokenAmount, TokenAmount) {
        match direction {
            SwapDirection::AToB => (self.reserve_a, self.reserve_b),
            SwapDirection::BToA => (self.reserve_b, self.reserve_a),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() || self.reserve_b.is_zero()
    }
}

/// One account's token balances and share of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPosition {
    pub balance_a: TokenAmount,
    pub balance_b: TokenAmount,
    pub liquidity: TokenAmount,
}

/// Pool and user state observed by one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub pool: PoolState,
    pub user: UserPosition,
}
