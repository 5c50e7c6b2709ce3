use crate::address::Address;
use crate::error::ParseError;
use crate::pool::SwapDirection;
use crate::units;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal precision of pool liquidity shares.
pub const LIQUIDITY_DECIMALS: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Parses a human decimal amount into this token's base units.
    ///
    /// # Errors
    /// Returns a [`ParseError`] for malformed input or excess precision.
    pub fn to_base_units(&self, amount: &str) -> Result<TokenAmount, ParseError> {
        units::to_base_units(self.decimals, amount)
    }

    /// Formats base units as a canonical decimal string.
    #[must_use]
    pub fn to_display_units(&self, amount: TokenAmount) -> String {
        units::to_display_units(self.decimals, amount)
    }
}

/// The two tokens of the pool, in contract order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token_a: Token,
    pub token_b: Token,
}

impl TokenPair {
    pub fn new(token_a: Token, token_b: Token) -> Self {
        Self { token_a, token_b }
    }

    /// Token sold in the given direction.
    #[must_use]
    pub fn input(&self, direction: SwapDirection) -> &Token {
        match direction {
            SwapDirection::AToB => &self.token_a,
            SwapDirection::BToA => &self.token_b,
        }
    }

    /// Token bought in the given direction.
    #[must_use]
    pub fn output(&self, direction: SwapDirection) -> &Token {
        match direction {
            SwapDirection::AToB => &self.token_b,
            SwapDirection::BToA => &self.token_a,
        }
    }
}

/// An unsigned amount in base units, as stored on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TokenAmount(pub U256);

impl TokenAmount {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for TokenAmount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for TokenAmount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl From<U256> for TokenAmount {
    fn from(v: U256) -> Self {
        Self(v)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::from_index;

    fn pair() -> TokenPair {
        TokenPair::new(
            Token::new(from_index(1), "WETH", 18),
            Token::new(from_index(2), "ABC", 6),
        )
    }

    #[test]
    fn test_pair_sides() {
        let pair = pair();
        assert_eq!(pair.input(SwapDirection::AToB).symbol, "WETH");
        assert_eq!(pair.output(SwapDirection::AToB).symbol, "ABC");
        assert_eq!(pair.input(SwapDirection::BToA).symbol, "ABC");
        assert_eq!(pair.output(SwapDirection::BToA).symbol, "WETH");
    }

    #[test]
    fn test_token_conversions_use_own_decimals() {
        let pair = pair();
        let amount = pair.token_b.to_base_units("1.5").unwrap();
        assert_eq!(amount, TokenAmount::from(1_500_000u64));
        assert_eq!(pair.token_b.to_display_units(amount), "1.5");
    }
}
