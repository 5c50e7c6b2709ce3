//! Prelude module for convenient imports.
//!
//! ```rust
//! use dex_client::prelude::*;
//! ```

pub use crate::approval::{Approval, Execution, GrantedApproval, SwapOutcome};
pub use crate::client::DexClient;
pub use crate::config::ClientConfig;
pub use crate::error::{ClientError, ConfigError};
pub use crate::state::FormattedState;
