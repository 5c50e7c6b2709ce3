//! JSON-RPC transport for EVM nodes.

mod config;
mod provider;
mod wallet;

pub use config::RpcConfig;
pub use provider::RpcProvider;
pub use wallet::NodeWallet;
