//! # Core Library
//!
//! Error taxonomy, configuration, target chain description and base-unit
//! arithmetic shared by the wallet manager and its hosts.

pub mod chain;
pub mod config;
pub mod error;
pub mod units;

// Re-export commonly used types
pub use chain::{NativeCurrency, TargetChainSpec};
pub use config::WalletConfig;
pub use error::{ProviderError, Result, WalletError};
pub use units::{decimal_to_base_units, format_native, U256};
