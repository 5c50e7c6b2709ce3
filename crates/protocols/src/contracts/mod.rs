//! Typed handles over the pool and ERC-20 interfaces.
//!
//! Reads go through a [`ChainReader`](crate::chain::ChainReader); writes are
//! returned as [`ContractCall`](crate::chain::ContractCall)s for a wallet to
//! submit.

/// SimpleDEX pool contract.
pub mod pool;
/// ERC-20 token contract.
pub mod token;

pub use pool::PoolContract;
pub use token::TokenContract;
