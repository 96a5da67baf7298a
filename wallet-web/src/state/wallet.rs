//! Wallet state management
//!
//! One [`WalletManager`] per page, bridged into Leptos: the manager's watch
//! channel is mirrored into an `RwSignal` so views re-render on every change.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_core::config::core_config;
use lib_wallet::{ConnectionState, SecurityApi, WalletManager};

use crate::services::BrowserHost;

pub type Manager = WalletManager<BrowserHost>;

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub state: RwSignal<ConnectionState>,
    /// Outcome of the last action, cleared when the next one starts.
    pub notice: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub busy: RwSignal<bool>,
    manager: StoredValue<Rc<Manager>, LocalStorage>,
    api: StoredValue<SecurityApi, LocalStorage>,
}

impl WalletContext {
    pub fn manager(&self) -> Rc<Manager> {
        self.manager.get_value()
    }

    pub fn api(&self) -> SecurityApi {
        self.api.get_value()
    }

    pub fn is_connected(&self) -> bool {
        self.state.with(|s| s.is_connected())
    }

    pub fn account(&self) -> Option<String> {
        self.state.with(|s| s.account.clone())
    }

    pub fn is_correct_chain(&self) -> bool {
        let chain = &core_config().chain;
        self.state.with(|s| s.is_correct_chain(chain))
    }

    /// Run a manager action in the background, reporting its outcome through
    /// `notice` / `error`. Ignored while another action is in flight.
    pub fn run<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<Manager>, SecurityApi) -> Fut + 'static,
        Fut: Future<Output = lib_core::Result<String>> + 'static,
    {
        if self.busy.get_untracked() {
            return;
        }
        self.busy.set(true);
        self.notice.set(None);
        self.error.set(None);

        let ctx = *self;
        let pending = action(self.manager(), self.api());
        spawn_local(async move {
            match pending.await {
                Ok(message) => ctx.notice.set(Some(message)),
                Err(e) => {
                    log::warn!("wallet action failed: {}", e);
                    ctx.error.set(Some(e.to_string()));
                }
            }
            ctx.busy.set(false);
        });
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let config = core_config();
    let manager = Rc::new(WalletManager::new(BrowserHost, config.chain.clone()));

    let context = WalletContext {
        state: RwSignal::new(manager.state()),
        notice: RwSignal::new(None),
        error: RwSignal::new(None),
        busy: RwSignal::new(false),
        manager: StoredValue::new_local(manager.clone()),
        api: StoredValue::new_local(SecurityApi::from_config(config)),
    };
    provide_context(context);

    let mut changes = manager.subscribe();
    let state = context.state;
    spawn_local(async move {
        loop {
            let snapshot = changes.borrow_and_update().clone();
            // signal disposed with the app
            if state.try_set(snapshot).is_some() {
                break;
            }
            if changes.changed().await.is_err() {
                break;
            }
        }
    });

    spawn_local(async move {
        manager.start().await;
        manager.run_balance_sync().await;
    });

    on_cleanup(move || {
        context.manager.try_with_value(|m| m.dispose());
    });

    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
