//! # Provider Discovery
//!
//! Wallet extensions inject into the page independently. When more than one is
//! installed, the top-level object may be an aggregate exposing every injected
//! wallet in a `providers` list, and the one that flags itself `isMetaMask` is
//! preferred.
//!
//! Discovery is pure inspection and is repeated for every operation: an
//! extension can be installed or enabled after the page loaded.

use tracing::debug;

use crate::provider::Eip1193Provider;

/// Where injected wallets are found (the browser `window`, or a test double).
pub trait ProviderHost {
    type Provider: Eip1193Provider + Clone;

    /// The top-level injected object (`window.ethereum`), if any.
    fn injected(&self) -> Option<Self::Provider>;

    /// Members of the multi-wallet aggregate (`window.ethereum.providers`).
    /// Empty when the host exposes a single wallet.
    fn injected_providers(&self) -> Vec<Self::Provider>;
}

/// Pick the wallet to talk to, or `None` when no usable wallet is injected.
///
/// - single wallet: it is returned
/// - aggregate: the member flagged `isMetaMask`, else the top-level object if
///   it is flagged itself, else nothing
pub fn select_provider<H: ProviderHost + ?Sized>(host: &H) -> Option<H::Provider> {
    let Some(injected) = host.injected() else {
        debug!("no injected wallet provider");
        return None;
    };

    let members = host.injected_providers();
    if members.is_empty() {
        debug!(meta_mask = injected.is_meta_mask(), "using single injected provider");
        return Some(injected);
    }

    if let Some(provider) = members.into_iter().find(|p| p.is_meta_mask()) {
        debug!("found MetaMask among injected providers");
        return Some(provider);
    }

    if injected.is_meta_mask() {
        debug!("using top-level MetaMask provider");
        return Some(injected);
    }

    debug!("no MetaMask provider among injected wallets");
    None
}
