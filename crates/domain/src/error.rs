//! Error types shared by the domain modules.

use thiserror::Error;

/// Malformed user input: amounts, percentages or addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or contained no digits.
    #[error("empty amount")]
    Empty,
    /// The input contained a character that is not a digit or a single dot.
    #[error("invalid character {found:?} in {input:?}")]
    InvalidCharacter {
        /// The offending input.
        input: String,
        /// The first rejected character.
        found: char,
    },
    /// More fractional digits than the token supports.
    #[error("{input:?} has {found} fractional digits, at most {max} allowed")]
    TooPrecise {
        /// The offending input.
        input: String,
        /// Fractional digits found.
        found: usize,
        /// Fractional digits allowed.
        max: u8,
    },
    /// The value does not fit in 256 bits.
    #[error("amount {0:?} overflows 256 bits")]
    Overflow(String),
    /// Token precision beyond what a 256-bit integer can scale.
    #[error("unsupported token precision: {0} decimals")]
    UnsupportedDecimals(u8),
    /// Slippage tolerance above 100%.
    #[error("slippage {0}% is above 100%")]
    SlippageOutOfRange(String),
    /// A hex address that is not 20 bytes of hex.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
}

/// Arithmetic failures of the pool formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// One of the reserves is zero, so no price exists.
    #[error("reserves must be non-zero")]
    EmptyReserves,
    /// No liquidity shares are outstanding.
    #[error("total liquidity is zero")]
    NoLiquidity,
    /// A swap fee of 100% or more.
    #[error("fee of {0} bps leaves nothing to swap")]
    InvalidFee(u32),
    /// An intermediate product overflowed 256 bits.
    #[error("arithmetic overflow")]
    Overflow,
}
