//! Domain model for the SimpleDEX client.
//!
//! This crate holds the value types and the pure integer arithmetic the client
//! must reproduce to stay consistent with the on-chain pool:
//! - Token metadata and base-unit amounts
//! - Decimal string <-> base unit conversion
//! - Slippage tolerance with one decimal of percent precision
//! - Constant-product quoting and liquidity share accounting

/// Prelude module for convenient imports.
pub mod prelude;

/// Hex account and contract addresses.
pub mod address;
/// Domain error types.
pub mod error;
/// Pool arithmetic.
pub mod math;
/// Pool and user state snapshots.
pub mod pool;
/// Advisory swap quotes.
pub mod quote;
/// Slippage tolerance.
pub mod slippage;
/// Token metadata and amounts.
pub mod token;
/// Decimal string conversion.
pub mod units;
