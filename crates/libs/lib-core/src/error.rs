//! # Centralized Error Handling
//!
//! Two error types cross the wallet boundary:
//!
//! - [`ProviderError`] is what an injected wallet reports when a request fails.
//!   It carries the wallet's numeric `code` (EIP-1193 / EIP-1474 convention)
//!   and its message, verbatim.
//! - [`WalletError`] is what the wallet manager reports to its callers. Its
//!   `Display` text is meant to be shown to the user as-is.
//!
//! ## Error Categories
//!
//! 1. **Preconditions** - checked before the provider is touched
//!    - [`ProviderUnavailable`](WalletError::ProviderUnavailable)
//!    - [`NotConnected`](WalletError::NotConnected)
//!    - [`WrongChain`](WalletError::WrongChain)
//!    - [`InvalidAmount`](WalletError::InvalidAmount) / [`InvalidAddress`](WalletError::InvalidAddress)
//!
//! 2. **Provider failures** - the wallet rejected a request
//!    - [`UserRejected`](WalletError::UserRejected) (code 4001)
//!    - [`OtherFailure`](WalletError::OtherFailure) (any other code)
//!    - [`RegistrationExhausted`](WalletError::RegistrationExhausted)
//!
//! 3. **Ambient failures**
//!    - [`Decoding`](WalletError::Decoding), [`Api`](WalletError::Api), [`Config`](WalletError::Config)
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{ProviderError, WalletError};
//!
//! let err = ProviderError::new(Some(4001), "User rejected the request.");
//! let wallet_err = WalletError::from_provider("Failed to connect", err);
//! assert!(matches!(wallet_err, WalletError::UserRejected(_)));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for `Result<T, WalletError>`.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Failure reported by an injected wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}{}", code_suffix(.code))]
pub struct ProviderError {
    /// Numeric error code, when the wallet supplied one.
    pub code: Option<i64>,
    /// Human readable message from the wallet.
    pub message: String,
}

impl ProviderError {
    /// The user dismissed or rejected the prompt.
    pub const USER_REJECTED: i64 = 4001;
    /// The provider does not support the requested method.
    pub const UNSUPPORTED_METHOD: i64 = 4200;
    /// The requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;

    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error for a capability the provider object does not expose at all.
    pub fn unsupported(method: &str) -> Self {
        Self::new(
            Some(Self::UNSUPPORTED_METHOD),
            format!("Provider does not support {}", method),
        )
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(Self::UNRECOGNIZED_CHAIN)
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code == Some(Self::USER_REJECTED)
    }

    pub fn is_unsupported(&self) -> bool {
        self.code == Some(Self::UNSUPPORTED_METHOD)
    }
}

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|code| format!(" (code {})", code)).unwrap_or_default()
}

/// Errors surfaced by the wallet manager.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No injected wallet could be found on the page.
    #[error("No wallet provider found. Install or enable MetaMask")]
    ProviderUnavailable,

    /// The action needs a connected account.
    #[error("Not connected")]
    NotConnected,

    /// The action needs the target chain to be active.
    #[error("Please switch to {expected_name} first (active chain: {})", .actual.as_deref().unwrap_or("unknown"))]
    WrongChain {
        expected_name: String,
        expected: String,
        actual: Option<String>,
    },

    /// The user rejected the wallet prompt.
    #[error("Request rejected in wallet: {0}")]
    UserRejected(ProviderError),

    /// The wallet failed the request for any other reason.
    #[error("{context}: {source}")]
    OtherFailure {
        context: String,
        source: ProviderError,
    },

    /// Every RPC endpoint candidate failed chain registration.
    #[error("Failed to add {chain_name} after trying all {attempted} RPC endpoints: {last_error}")]
    RegistrationExhausted {
        chain_name: String,
        attempted: usize,
        last_error: ProviderError,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The provider answered with a payload of an unexpected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Security API communication error.
    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    /// Classify a provider failure, keeping user rejections distinct.
    pub fn from_provider(context: &str, err: ProviderError) -> Self {
        if err.is_user_rejected() {
            WalletError::UserRejected(err)
        } else {
            WalletError::OtherFailure {
                context: context.to_string(),
                source: err,
            }
        }
    }

    /// The provider error behind this failure, if there is one.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            WalletError::UserRejected(err) => Some(err),
            WalletError::OtherFailure { source, .. } => Some(source),
            WalletError::RegistrationExhausted { last_error, .. } => Some(last_error),
            _ => None,
        }
    }
}

/// Convert `serde_json::Error` to `WalletError`.
impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Decoding(format!("JSON error: {}", err))
    }
}

/// Convert `reqwest::Error` to `WalletError`.
impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => WalletError::Api(format!("HTTP {}: {}", status, err)),
            None => WalletError::Api(err.to_string()),
        }
    }
}
