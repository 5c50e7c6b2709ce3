//! Client adapter for a SimpleDEX constant-product pool.
//!
//! This crate turns user-level intents into pool and token contract calls:
//! - Token metadata discovery and unit conversion
//! - Read-only swap quotes with slippage-protected minimums
//! - Cached pool and user state with concurrent refresh
//! - Approve-then-act sequencing for swaps and liquidity changes

/// Prelude module for convenient imports.
pub mod prelude;

/// Approval and transaction outcomes.
pub mod approval;
/// The adapter itself.
pub mod client;
/// Client configuration.
pub mod config;
/// Error types.
pub mod error;
/// Display form of the cached state.
pub mod state;
