//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use dex_domain::prelude::*;
//! ```

pub use crate::address::Address;
pub use crate::error::{MathError, ParseError};
pub use crate::math::{constant_product, shares};
pub use crate::pool::{PoolState, StateSnapshot, SwapDirection, UserPosition};
pub use crate::quote::Quote;
pub use crate::slippage::SlippageTolerance;
pub use crate::token::{LIQUIDITY_DECIMALS, Token, TokenAmount, TokenPair};
pub use crate::units::{round_for_display, to_base_units, to_display_units};
