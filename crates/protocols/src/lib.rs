//! Chain interface for the SimpleDEX pool.
//!
//! This crate provides everything between the client adapter and the chain:
//! - Solidity bindings for the pool and ERC-20 interfaces
//! - The `ChainReader` and `Wallet` capabilities
//! - Typed pool and token contract handles
//! - An alloy JSON-RPC provider for EVM nodes
//! - An in-memory simulated chain for tests and offline demos

/// Prelude module for convenient imports.
pub mod prelude;

/// Solidity interface bindings.
pub mod abi;
/// Contract calls, receipts and chain capabilities.
pub mod chain;
/// Typed contract handles.
pub mod contracts;
/// Error types.
pub mod error;
/// JSON-RPC transport.
pub mod rpc;
/// In-memory chain running the documented pool formula.
pub mod simulated;
