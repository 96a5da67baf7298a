//! # Wallet Manager
//!
//! [`WalletManager`] is the single owner of provider state for a page. It is
//! constructed once by the host and handed to views, which read
//! [`ConnectionState`] and call the async actions.
//!
//! ## Lifecycle
//!
//! 1. [`WalletManager::start`] subscribes to `accountsChanged` / `chainChanged`
//!    and reads the current accounts and chain id.
//! 2. The host drives [`WalletManager::run_balance_sync`], which re-fetches the
//!    balance whenever the account or chain changes.
//! 3. [`WalletManager::dispose`] (or drop) removes the event listeners.
//!
//! Operations are not serialized: overlapping calls go straight to the
//! provider, which either queues them or rejects the second prompt.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lib_core::units::{decimal_to_base_units, parse_hex_quantity, to_hex_quantity};
use lib_core::{Result, TargetChainSpec, WalletError};
use lib_utils::validate_evm_address;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::discovery::{select_provider, ProviderHost};
use crate::provider::methods::*;
use crate::provider::{Eip1193Provider, Listener, ProviderEvent};
use crate::security::SecurityApi;
use crate::state::{ConnectionState, StateStore};
use crate::switch::{ChainSwitcher, SwitchReport};

/// Gas limit of a plain value transfer.
pub const TRANSFER_GAS: &str = "0x5208";

/// `eth_sendTransaction` parameter for a native transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    /// Hex quantity in wei.
    pub value: String,
    pub gas: String,
}

/// Provider subscriptions made by `start`, kept for teardown.
struct Session<P> {
    provider: P,
    listeners: Vec<(ProviderEvent, Listener)>,
}

pub struct WalletManager<H: ProviderHost> {
    host: H,
    chain: TargetChainSpec,
    state: StateStore,
    session: RefCell<Option<Session<H::Provider>>>,
    disposed: Cell<bool>,
}

impl<H: ProviderHost> WalletManager<H> {
    /// Manager with empty state. Nothing touches the provider until [`start`](Self::start).
    pub fn new(host: H, chain: TargetChainSpec) -> Self {
        Self {
            host,
            chain,
            state: StateStore::new(),
            session: RefCell::new(None),
            disposed: Cell::new(false),
        }
    }

    pub fn chain(&self) -> &TargetChainSpec {
        &self.chain
    }

    pub fn state(&self) -> ConnectionState {
        self.state.snapshot()
    }

    /// Change notifications for the UI layer.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    pub fn is_correct_chain(&self) -> bool {
        self.state.snapshot().is_correct_chain(&self.chain)
    }

    /// Discover the wallet to use right now.
    fn provider(&self) -> Option<H::Provider> {
        select_provider(&self.host)
    }

    // region:    --- Synchronization

    /// Subscribe to provider events and read the current accounts and chain.
    ///
    /// Read failures are ignored and a provider without an event API is
    /// tolerated; state then only reflects the one-shot read.
    pub async fn start(&self) {
        self.teardown();
        self.disposed.set(false);

        let Some(provider) = self.provider() else {
            info!("no wallet provider found");
            self.state.set_has_provider(false);
            return;
        };
        self.state.set_has_provider(true);

        let listeners = self.subscribe_events(&provider);
        *self.session.borrow_mut() = Some(Session {
            provider: provider.clone(),
            listeners,
        });

        match call::<_, Vec<String>>(&provider, ETH_ACCOUNTS, vec![], "Failed to read accounts").await {
            Ok(accounts) => self.state.set_account(accounts.into_iter().next()),
            Err(e) => debug!(error = %e, "initial account read failed"),
        }
        match call::<_, String>(&provider, ETH_CHAIN_ID, vec![], "Failed to read chain id").await {
            Ok(chain_id) => self.state.set_chain_id(Some(chain_id)),
            Err(e) => debug!(error = %e, "initial chain id read failed"),
        }
    }

    fn subscribe_events(&self, provider: &H::Provider) -> Vec<(ProviderEvent, Listener)> {
        let mut registered = Vec::new();

        for event in ProviderEvent::ALL {
            let listener = self.listener_for(event);
            match provider.on(event, listener.clone()) {
                Ok(()) => registered.push((event, listener)),
                Err(e) => {
                    warn!(event = event.name(), error = %e, "provider event subscription failed, state will not auto-update");
                }
            }
        }
        registered
    }

    fn listener_for(&self, event: ProviderEvent) -> Listener {
        let state = self.state.clone();
        match event {
            ProviderEvent::AccountsChanged => Rc::new(move |payload: &Value| {
                let account = payload
                    .as_array()
                    .and_then(|accounts| accounts.first())
                    .and_then(Value::as_str)
                    .map(str::to_string);
                debug!(account = ?account, "accountsChanged");
                state.set_account(account);
            }),
            ProviderEvent::ChainChanged => Rc::new(move |payload: &Value| match payload.as_str() {
                Some(chain_id) => {
                    debug!(chain_id, "chainChanged");
                    state.set_chain_id(Some(chain_id.to_string()));
                }
                None => debug!(payload = %payload, "ignoring malformed chainChanged payload"),
            }),
        }
    }

    /// Remove event listeners and stop [`run_balance_sync`](Self::run_balance_sync).
    pub fn dispose(&self) {
        self.teardown();
        self.disposed.set(true);
        self.state.notify();
    }

    /// Best-effort listener removal; failures are swallowed.
    fn teardown(&self) {
        let Some(session) = self.session.borrow_mut().take() else {
            return;
        };

        for (event, listener) in &session.listeners {
            match session.provider.remove_listener(*event, listener) {
                Ok(()) => {}
                Err(e) if e.is_unsupported() => {
                    if let Err(e) = session.provider.remove_all_listeners(*event) {
                        debug!(event = event.name(), error = %e, "removeAllListeners failed");
                    }
                }
                Err(e) => debug!(event = event.name(), error = %e, "removeListener failed"),
            }
        }
    }

    /// Keep the balance in step with the account and chain until disposed.
    pub async fn run_balance_sync(&self) {
        let mut rx = self.state.subscribe();
        let mut last_key = None;

        loop {
            if self.disposed.get() {
                break;
            }

            let key = {
                let state = rx.borrow_and_update();
                (state.account.clone(), state.chain_id.clone())
            };
            if last_key.as_ref() != Some(&key) {
                last_key = Some(key);
                self.sync_balance().await;
            }

            if rx.changed().await.is_err() {
                break;
            }
        }
        debug!("balance sync stopped");
    }

    /// Fetch the balance of the current account once.
    ///
    /// No account or a failed fetch leaves the balance unknown; a result for an
    /// account that is no longer active is dropped.
    pub async fn sync_balance(&self) {
        let Some(account) = self.state.snapshot().account else {
            self.state.set_balance(None);
            return;
        };
        let Some(provider) = self.provider() else {
            self.state.set_balance(None);
            return;
        };

        let balance = match fetch_balance(&provider, &account).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!(account = %account, error = %e, "balance fetch failed");
                None
            }
        };
        if !self.state.set_balance_for(&account, balance) {
            debug!(account = %account, "discarding balance for inactive account");
        }
    }

    // endregion: --- Synchronization

    // region:    --- Actions

    /// Ask the wallet for account access (may prompt the user).
    pub async fn connect(&self) -> Result<()> {
        let provider = self.provider().ok_or(WalletError::ProviderUnavailable)?;
        self.state.set_has_provider(true);

        clear_pending(&provider, ETH_ACCOUNTS).await;

        let accounts: Vec<String> = call(&provider, ETH_REQUEST_ACCOUNTS, vec![], "Failed to connect wallet").await?;
        let account = accounts.into_iter().next();
        match &account {
            Some(account) => info!(account = %account, "wallet connected"),
            None => info!("wallet exposed no accounts"),
        }
        self.state.set_account(account);
        Ok(())
    }

    /// Forget account, chain and balance. The wallet's own permission grant is untouched.
    pub fn disconnect(&self) {
        self.state.clear();
        info!("wallet disconnected");
    }

    /// Switch the wallet to the target chain, registering it with each RPC
    /// candidate in turn if the wallet does not know it.
    pub async fn switch_to_target_chain(&self) -> Result<SwitchReport> {
        let candidates = self.chain.rpc_urls.clone();
        self.negotiate_chain(&candidates).await
    }

    /// Same negotiation restricted to the primary RPC endpoint.
    pub async fn switch_with_primary_endpoint(&self) -> Result<SwitchReport> {
        let primary = self
            .chain
            .primary_rpc_url()
            .ok_or_else(|| WalletError::Config("No RPC endpoint configured".to_string()))?
            .to_string();
        self.negotiate_chain(&[primary]).await
    }

    async fn negotiate_chain(&self, candidates: &[String]) -> Result<SwitchReport> {
        let provider = self.provider().ok_or(WalletError::ProviderUnavailable)?;
        info!(
            current = ?self.state.snapshot().chain_id,
            target = %self.chain.chain_id_hex(),
            "switching wallet chain"
        );

        clear_pending(&provider, ETH_CHAIN_ID).await;

        let report = ChainSwitcher::new(&provider, &self.chain).run(candidates).await?;

        // not every wallet emits chainChanged
        match call::<_, String>(&provider, ETH_CHAIN_ID, vec![], "Failed to read chain id").await {
            Ok(chain_id) => self.state.set_chain_id(Some(chain_id)),
            Err(e) => debug!(error = %e, "chain id read after switch failed"),
        }
        Ok(report)
    }

    /// Register the target chain with its primary RPC endpoint, without switching.
    pub async fn add_target_chain_manually(&self) -> Result<bool> {
        let provider = self.provider().ok_or(WalletError::ProviderUnavailable)?;
        let primary = self
            .chain
            .primary_rpc_url()
            .ok_or_else(|| WalletError::Config("No RPC endpoint configured".to_string()))?
            .to_string();
        let params = serde_json::to_value(self.chain.registration_params(&[primary]))?;

        provider
            .request(WALLET_ADD_ETHEREUM_CHAIN, vec![params])
            .await
            .map_err(|e| WalletError::from_provider(&format!("Failed to manually add {}", self.chain.chain_name), e))?;

        info!(chain = %self.chain.chain_name, "chain added manually");
        Ok(true)
    }

    /// Transfer `amount` native units to `to`, returning the transaction hash.
    ///
    /// Requires a connected account on the target chain; never switches
    /// chains on the caller's behalf.
    pub async fn send_transaction(&self, to: &str, amount: &str) -> Result<String> {
        let state = self.state.snapshot();
        let from = state.account.clone().ok_or(WalletError::NotConnected)?;

        if !state.is_correct_chain(&self.chain) {
            return Err(WalletError::WrongChain {
                expected_name: self.chain.chain_name.clone(),
                expected: self.chain.chain_id_hex(),
                actual: state.chain_id,
            });
        }

        validate_evm_address(to).map_err(WalletError::InvalidAddress)?;
        let value = decimal_to_base_units(amount)?;
        let provider = self.provider().ok_or(WalletError::ProviderUnavailable)?;

        let request = TransferRequest {
            from,
            to: to.to_string(),
            value: to_hex_quantity(value),
            gas: TRANSFER_GAS.to_string(),
        };
        let hash: String = call(
            &provider,
            ETH_SEND_TRANSACTION,
            vec![serde_json::to_value(&request)?],
            "Transaction failed",
        )
        .await?;

        info!(hash = %hash, to = %request.to, value = %request.value, "transaction submitted");
        Ok(hash)
    }

    /// Re-read the balance now. Without a provider or account this does nothing.
    pub async fn refresh(&self) -> Result<()> {
        let Some(account) = self.state.snapshot().account else {
            return Ok(());
        };
        let Some(provider) = self.provider() else {
            return Ok(());
        };

        let balance = fetch_balance(&provider, &account).await?;
        self.state.set_balance_for(&account, Some(balance));
        Ok(())
    }

    /// Subscribe the connected account to exploit alerts for `protocol`.
    pub async fn subscribe_to_protocol(&self, api: &SecurityApi, protocol: &str) -> Result<()> {
        let account = self.state.snapshot().account.ok_or(WalletError::NotConnected)?;
        api.subscribe(&account, protocol).await?;
        Ok(())
    }

    /// Remove the connected account's subscription to `protocol`.
    pub async fn unsubscribe_from_protocol(&self, api: &SecurityApi, protocol: &str) -> Result<()> {
        let account = self.state.snapshot().account.ok_or(WalletError::NotConnected)?;
        api.unsubscribe(&account, protocol).await?;
        Ok(())
    }

    // endregion: --- Actions
}

impl<H: ProviderHost> Drop for WalletManager<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Typed provider request.
async fn call<P, T>(provider: &P, method: &str, params: Vec<Value>, context: &str) -> Result<T>
where
    P: Eip1193Provider + ?Sized,
    T: DeserializeOwned,
{
    let value = provider
        .request(method, params)
        .await
        .map_err(|e| WalletError::from_provider(context, e))?;

    serde_json::from_value(value).map_err(|e| WalletError::Decoding(format!("{} returned unexpected payload: {}", method, e)))
}

/// Harmless read issued before a prompting request; its failure is ignored.
async fn clear_pending<P: Eip1193Provider + ?Sized>(provider: &P, method: &str) {
    if let Err(e) = provider.request(method, vec![]).await {
        debug!(method, error = %e, "pending request clear failed");
    }
}

/// Balance of `account` in wei as a decimal string.
async fn fetch_balance<P: Eip1193Provider + ?Sized>(provider: &P, account: &str) -> Result<String> {
    let raw: String = call(
        provider,
        ETH_GET_BALANCE,
        vec![json!(account), json!("latest")],
        "Failed to fetch balance",
    )
    .await?;
    Ok(parse_hex_quantity(&raw)?.to_string())
}
