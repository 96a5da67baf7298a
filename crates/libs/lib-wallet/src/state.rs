//! # Connection State
//!
//! [`ConnectionState`] is what the UI renders; [`StateStore`] is the observable
//! holder the manager writes through. Writers are the initial read, the two
//! provider event callbacks and the manager's action methods. Readers subscribe
//! with [`StateStore::subscribe`] and are woken on every effective change.

use std::rc::Rc;

use lib_core::units::{format_native, U256};
use lib_core::TargetChainSpec;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Snapshot of what the manager knows about the wallet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    /// A usable injected wallet was found at start.
    pub has_provider: bool,
    /// Primary account, set only after the wallet exposed one.
    pub account: Option<String>,
    /// Last chain id the wallet reported (hex), not necessarily the target.
    pub chain_id: Option<String>,
    /// Native balance of `account` in wei, as a decimal string.
    pub balance: Option<String>,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Whether `account` is the active account. Async results keyed on an
    /// account are dropped once this turns false.
    pub fn is_account(&self, account: &str) -> bool {
        self.account.as_deref() == Some(account)
    }

    /// Whether the wallet's active chain is `chain`.
    pub fn is_correct_chain(&self, chain: &TargetChainSpec) -> bool {
        self.chain_id.as_deref().is_some_and(|id| chain.is_chain(id))
    }

    pub fn balance_wei(&self) -> Option<U256> {
        self.balance.as_deref().and_then(|b| U256::from_str_radix(b, 10).ok())
    }

    /// Balance in native units with `precision` fractional digits, `None` when unknown.
    pub fn formatted_balance(&self, precision: usize) -> Option<String> {
        self.balance_wei().map(|wei| format_native(wei, precision))
    }
}

/// Single-threaded observable holder for [`ConnectionState`].
///
/// Cloning yields another handle to the same state.
#[derive(Clone, Debug)]
pub struct StateStore {
    tx: Rc<watch::Sender<ConnectionState>>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    /// Empty state: no provider, no account, no chain, no balance.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectionState::default());
        Self { tx: Rc::new(tx) }
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.tx.borrow().clone()
    }

    /// Receiver that is notified on every change after this call.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }

    pub fn set_has_provider(&self, has_provider: bool) {
        self.update(|s| replace(&mut s.has_provider, has_provider));
    }

    /// Set the primary account. Any change of account clears the balance.
    pub fn set_account(&self, account: Option<String>) {
        self.update(|s| {
            if s.account == account {
                return false;
            }
            s.account = account;
            s.balance = None;
            true
        });
    }

    pub fn set_chain_id(&self, chain_id: Option<String>) {
        self.update(|s| replace(&mut s.chain_id, chain_id));
    }

    pub fn set_balance(&self, balance: Option<String>) {
        self.update(|s| replace(&mut s.balance, balance));
    }

    /// Set the balance only if `account` is still the active account.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn set_balance_for(&self, account: &str, balance: Option<String>) -> bool {
        let mut applied = false;
        self.update(|s| {
            if !s.is_account(account) {
                return false;
            }
            applied = true;
            replace(&mut s.balance, balance)
        });
        applied
    }

    /// Forget account, chain and balance. Provider presence is kept.
    pub fn clear(&self) {
        self.update(|s| {
            let account = replace(&mut s.account, None);
            let chain = replace(&mut s.chain_id, None);
            let balance = replace(&mut s.balance, None);
            account || chain || balance
        });
    }

    /// Wake every subscriber without changing the state.
    pub fn notify(&self) {
        self.tx.send_modify(|_| {});
    }

    fn update(&self, modify: impl FnOnce(&mut ConnectionState) -> bool) {
        self.tx.send_if_modified(modify);
    }
}

/// Assign and report whether the value changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
