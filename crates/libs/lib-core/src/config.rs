//! # Wallet Configuration
//!
//! Configuration for the wallet manager host, loaded from environment
//! variables (and a `.env` file when present).
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `WALLET_API_BASE` | `http://127.0.0.1:8000` | Base URL of the security API |
//! | `WALLET_RPC_URLS` | BNB Smart Chain public endpoints | Comma-separated RPC candidates, in registration order |
//!
//! In the browser there is no environment, so the defaults apply.
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().expect("invalid wallet configuration");
//! let chain = &core_config().chain;
//! ```

use std::sync::OnceLock;

use lib_utils::envs::{self, get_env_list, get_env_or};
use lib_utils::validate_http_url;

use crate::chain::TargetChainSpec;
use crate::error::{Result, WalletError};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Wallet host configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletConfig {
    /// Base URL of the security API (protocol subscriptions).
    pub api_base: String,

    /// Network the wallet is negotiated onto.
    pub chain: TargetChainSpec,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            chain: TargetChainSpec::bnb_smart_chain(),
        }
    }
}

impl WalletConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_base = get_env_or("WALLET_API_BASE", DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let chain = match get_env_list("WALLET_RPC_URLS") {
            Ok(urls) => TargetChainSpec::bnb_smart_chain().with_rpc_urls(urls),
            Err(envs::Error::MissingEnv(_)) => TargetChainSpec::bnb_smart_chain(),
            Err(e) => return Err(WalletError::Config(format!("WALLET_RPC_URLS: {}", e))),
        };

        Ok(Self { api_base, chain })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.api_base).map_err(|e| WalletError::Config(format!("WALLET_API_BASE: {}", e)))?;

        if self.chain.rpc_urls.is_empty() {
            return Err(WalletError::Config("At least one RPC endpoint is required".to_string()));
        }
        for url in &self.chain.rpc_urls {
            validate_http_url(url).map_err(|e| WalletError::Config(format!("WALLET_RPC_URLS: {}", e)))?;
        }
        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<WalletConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if the environment is invalid, validation fails, or the
/// config has already been initialized.
pub fn init_config() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = WalletConfig::from_env()?;
    config.validate()?;
    tracing::debug!(api_base = %config.api_base, rpc_urls = ?config.chain.rpc_urls, "wallet config loaded");

    CONFIG
        .set(config)
        .map_err(|_| WalletError::Config("Config has already been initialized".to_string()))
}

/// Get the global configuration, falling back to defaults if
/// [`init_config()`] was never called.
pub fn core_config() -> &'static WalletConfig {
    CONFIG.get_or_init(WalletConfig::default)
}
