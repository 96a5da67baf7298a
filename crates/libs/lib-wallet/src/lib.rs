//! # Wallet Library
//!
//! Browser wallet connection manager: discovers an injected EIP-1193 provider,
//! mirrors its account/chain state, and negotiates it onto the target chain.
//!
//! ## Modules
//!
//! - [`provider`] - the narrow provider interface hosts implement
//! - [`discovery`] - picking the injected wallet to talk to
//! - [`state`] - observable connection state
//! - [`switch`] - chain switch / registration state machine
//! - [`manager`] - [`WalletManager`], the single owner of provider state
//! - [`security`] - protocol exploit-alert subscriptions over REST

pub mod discovery;
pub mod manager;
pub mod provider;
pub mod security;
pub mod state;
pub mod switch;

// Re-export commonly used types
pub use discovery::{select_provider, ProviderHost};
pub use manager::WalletManager;
pub use provider::{Eip1193Provider, Listener, ProviderEvent};
pub use security::SecurityApi;
pub use state::{ConnectionState, StateStore};
pub use switch::{ChainSwitcher, SwitchReport, SwitchState};
