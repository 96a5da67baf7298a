//! Scripted wallet provider for manager tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use lib_core::{ProviderError, TargetChainSpec};
use lib_wallet::{Eip1193Provider, Listener, ProviderEvent, ProviderHost, WalletManager};
use serde_json::{json, Value};

pub const ALICE: &str = "0x8894e0a0c962cb723c1976a4421c95949be2d4e3";
pub const BOB: &str = "0x1111111111111111111111111111111111111111";
pub const RECIPIENT: &str = "0x2222222222222222222222222222222222222222";

/// How much of the event API the fake exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSupport {
    /// `on`, `removeListener` and `removeAllListeners`.
    Full,
    /// `on` and `removeAllListeners` only.
    RemoveAllOnly,
    /// `on` works, every removal throws.
    RemovalThrows,
    /// `on` throws.
    SubscribeThrows,
    /// No event API at all.
    Absent,
}

struct Inner {
    meta_mask: bool,
    events: EventSupport,
    queued: HashMap<String, VecDeque<Result<Value, ProviderError>>>,
    defaults: HashMap<String, Result<Value, ProviderError>>,
    calls: Vec<(String, Vec<Value>)>,
    listeners: Vec<(ProviderEvent, Listener)>,
}

#[derive(Clone)]
pub struct ScriptedProvider {
    inner: Rc<RefCell<Inner>>,
}

impl ScriptedProvider {
    /// MetaMask-flagged provider with the full event API and nothing scripted.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                meta_mask: true,
                events: EventSupport::Full,
                queued: HashMap::new(),
                defaults: HashMap::new(),
                calls: Vec::new(),
                listeners: Vec::new(),
            })),
        }
    }

    /// Provider already on BNB Smart Chain, exposing no accounts until asked.
    pub fn on_bnb() -> Self {
        let provider = Self::new();
        provider.respond_default("eth_accounts", Ok(json!([])));
        provider.respond_default("eth_chainId", Ok(json!("0x38")));
        provider
    }

    pub fn with_events(self, events: EventSupport) -> Self {
        self.inner.borrow_mut().events = events;
        self
    }

    pub fn with_meta_mask(self, meta_mask: bool) -> Self {
        self.inner.borrow_mut().meta_mask = meta_mask;
        self
    }

    /// Queue a one-shot response for `method`, consumed before the default.
    pub fn respond(&self, method: &str, response: Result<Value, ProviderError>) {
        self.inner
            .borrow_mut()
            .queued
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    /// Response for `method` once its queue is empty.
    pub fn respond_default(&self, method: &str, response: Result<Value, ProviderError>) {
        self.inner.borrow_mut().defaults.insert(method.to_string(), response);
    }

    /// Params of every call to `method`, in order.
    pub fn calls(&self, method: &str) -> Vec<Vec<Value>> {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls(method).len()
    }

    pub fn methods(&self) -> Vec<String> {
        self.inner.borrow().calls.iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Fire `event` at every registered listener.
    pub fn emit(&self, event: ProviderEvent, payload: Value) {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&payload);
        }
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for ScriptedProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push((method.to_string(), params));

        if let Some(response) = inner.queued.get_mut(method).and_then(VecDeque::pop_front) {
            return response;
        }
        inner
            .defaults
            .get(method)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::new(Some(4200), format!("unscripted method {}", method))))
    }

    fn is_meta_mask(&self) -> bool {
        self.inner.borrow().meta_mask
    }

    fn on(&self, event: ProviderEvent, listener: Listener) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        match inner.events {
            EventSupport::Absent => Err(ProviderError::unsupported("on")),
            EventSupport::SubscribeThrows => Err(ProviderError::new(None, "event emitter crashed")),
            _ => {
                inner.listeners.push((event, listener));
                Ok(())
            }
        }
    }

    fn remove_listener(&self, event: ProviderEvent, listener: &Listener) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        match inner.events {
            EventSupport::Full => {
                inner
                    .listeners
                    .retain(|(e, l)| !(*e == event && Rc::ptr_eq(l, listener)));
                Ok(())
            }
            EventSupport::RemovalThrows => Err(ProviderError::new(None, "provider finalized")),
            _ => Err(ProviderError::unsupported("removeListener")),
        }
    }

    fn remove_all_listeners(&self, event: ProviderEvent) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        match inner.events {
            EventSupport::Full | EventSupport::RemoveAllOnly => {
                inner.listeners.retain(|(e, _)| *e != event);
                Ok(())
            }
            EventSupport::RemovalThrows => Err(ProviderError::new(None, "provider finalized")),
            _ => Err(ProviderError::unsupported("removeAllListeners")),
        }
    }
}

/// Page with zero or more injected wallets.
#[derive(Clone, Default)]
pub struct ScriptedHost {
    pub injected: Option<ScriptedProvider>,
    pub providers: Vec<ScriptedProvider>,
}

impl ProviderHost for ScriptedHost {
    type Provider = ScriptedProvider;

    fn injected(&self) -> Option<ScriptedProvider> {
        self.injected.clone()
    }

    fn injected_providers(&self) -> Vec<ScriptedProvider> {
        self.providers.clone()
    }
}

pub fn manager_for(provider: &ScriptedProvider) -> WalletManager<ScriptedHost> {
    WalletManager::new(
        ScriptedHost {
            injected: Some(provider.clone()),
            providers: vec![],
        },
        TargetChainSpec::bnb_smart_chain(),
    )
}

pub fn manager_without_wallet() -> WalletManager<ScriptedHost> {
    WalletManager::new(ScriptedHost::default(), TargetChainSpec::bnb_smart_chain())
}

pub fn provider_error(code: i64, message: &str) -> Result<Value, ProviderError> {
    Err(ProviderError::new(Some(code), message))
}

pub fn unrecognized_chain() -> Result<Value, ProviderError> {
    provider_error(4902, "Unrecognized chain ID \"0x38\". Try adding the chain using wallet_addEthereumChain first.")
}

/// Let a concurrently polled balance sync loop catch up.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
