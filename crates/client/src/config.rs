use crate::error::ConfigError;
use dex_data::AddressBook;
use dex_domain::address::Address;
use dex_domain::slippage::SlippageTolerance;
use dex_protocols::rpc::RpcConfig;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// File written by the deployment script.
pub const DEFAULT_ADDRESS_FILE: &str = "contract-addresses.json";
/// Fractional digits shown for amounts in the formatted state.
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 6;

pub const ENV_RPC_URL: &str = "DEX_RPC_URL";
pub const ENV_ADDRESSES: &str = "DEX_ADDRESSES";
pub const ENV_POOL: &str = "DEX_POOL";
pub const ENV_SWAP_SLIPPAGE: &str = "DEX_SWAP_SLIPPAGE";
pub const ENV_LIQUIDITY_SLIPPAGE: &str = "DEX_LIQUIDITY_SLIPPAGE";
pub const ENV_DISPLAY_DECIMALS: &str = "DEX_DISPLAY_DECIMALS";

/// Configuration for a [`DexClient`](crate::client::DexClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Node transport policy.
    pub rpc: RpcConfig,
    /// Deployment address record.
    pub addresses_path: PathBuf,
    /// Pool address; takes precedence over the address record.
    pub pool: Option<Address>,
    /// Tolerance applied to swaps when the caller gives none.
    pub swap_slippage: SlippageTolerance,
    /// Tolerance applied to liquidity changes when the caller gives none.
    pub liquidity_slippage: SlippageTolerance,
    /// Fractional digits in [`FormattedState`](crate::state::FormattedState).
    pub display_decimals: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            addresses_path: PathBuf::from(DEFAULT_ADDRESS_FILE),
            pool: None,
            swap_slippage: SlippageTolerance::HALF_PERCENT,
            liquidity_slippage: SlippageTolerance::HALF_PERCENT,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }
}

impl ClientConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads overrides through `lookup`, starting from the defaults.
    ///
    /// # Errors
    /// Returns an error if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_RPC_URL) {
            config.rpc.url = url;
        }
        if let Some(path) = lookup(ENV_ADDRESSES) {
            config.addresses_path = PathBuf::from(path);
        }
        if let Some(pool) = parse_var(&lookup, ENV_POOL)? {
            config.pool = Some(pool);
        }
        if let Some(slippage) = parse_var(&lookup, ENV_SWAP_SLIPPAGE)? {
            config.swap_slippage = slippage;
        }
        if let Some(slippage) = parse_var(&lookup, ENV_LIQUIDITY_SLIPPAGE)? {
            config.liquidity_slippage = slippage;
        }
        if let Some(places) = parse_var(&lookup, ENV_DISPLAY_DECIMALS)? {
            config.display_decimals = places;
        }

        debug!(rpc = %config.rpc.url, pool = ?config.pool, "Loaded client configuration");
        Ok(config)
    }

    /// The pool address: the explicit override, else the `dex` entry of the
    /// address record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be read or lacks the entry.
    pub async fn pool_address(&self) -> Result<Address, ConfigError> {
        if let Some(pool) = self.pool {
            return Ok(pool);
        }
        let book = AddressBook::load(&self.addresses_path).await?;
        Ok(book.pool()?)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            reason: e.to_string(),
            value,
        })
}
