//! # Injected Provider Interface
//!
//! The subset of EIP-1193 the manager relies on: a `request` call plus named
//! event subscriptions. Production binds this to `window.ethereum`; tests bind
//! it to a scripted fake.
//!
//! Subscription methods default to [`ProviderError::unsupported`] so an
//! adapter for a provider without an event API only implements `request`.

use std::rc::Rc;

use async_trait::async_trait;
use lib_core::ProviderError;
use serde_json::Value;

/// JSON-RPC methods sent to the provider.
pub mod methods {
    pub const ETH_ACCOUNTS: &str = "eth_accounts";
    pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ETH_CHAIN_ID: &str = "eth_chainId";
    pub const ETH_GET_BALANCE: &str = "eth_getBalance";
    pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
    pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";
}

/// Provider notifications the manager listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderEvent {
    /// Payload: array of account addresses, primary first.
    AccountsChanged,
    /// Payload: hex chain id string.
    ChainChanged,
}

impl ProviderEvent {
    pub const ALL: [ProviderEvent; 2] = [ProviderEvent::AccountsChanged, ProviderEvent::ChainChanged];

    /// Event name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderEvent::AccountsChanged => "accountsChanged",
            ProviderEvent::ChainChanged => "chainChanged",
        }
    }
}

/// Event callback. Identity (`Rc::ptr_eq`) is what `remove_listener` matches on.
pub type Listener = Rc<dyn Fn(&Value)>;

/// An injected wallet.
#[async_trait(?Send)]
pub trait Eip1193Provider {
    /// Send `method` with positional `params`, resolving to the raw result.
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError>;

    /// Self-reported primary wallet flag (`isMetaMask`).
    fn is_meta_mask(&self) -> bool {
        false
    }

    fn on(&self, _event: ProviderEvent, _listener: Listener) -> Result<(), ProviderError> {
        Err(ProviderError::unsupported("on"))
    }

    fn remove_listener(&self, _event: ProviderEvent, _listener: &Listener) -> Result<(), ProviderError> {
        Err(ProviderError::unsupported("removeListener"))
    }

    fn remove_all_listeners(&self, _event: ProviderEvent) -> Result<(), ProviderError> {
        Err(ProviderError::unsupported("removeAllListeners"))
    }
}
