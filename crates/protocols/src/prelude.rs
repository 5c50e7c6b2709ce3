//! Prelude module for convenient imports.
//!
//! ```rust
//! use dex_protocols::prelude::*;
//! ```

pub use crate::chain::{ChainReader, ContractCall, TransactionReceipt, Wallet};
pub use crate::contracts::{PoolContract, TokenContract};
pub use crate::error::{ChainError, RpcError};
pub use crate::rpc::{NodeWallet, RpcConfig, RpcProvider};
pub use crate::simulated::{SimulatedChain, SimulatedWallet};
