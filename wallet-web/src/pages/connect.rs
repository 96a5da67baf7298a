//! Connect Wallet Page - connection, network and balance controls

use leptos::prelude::*;
use lib_core::config::core_config;
use shared::utils::truncate_address;

use crate::state::wallet::use_wallet_context;
use crate::utils::format::{chain_label, format_balance};

#[component]
pub fn ConnectPage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let chain = &core_config().chain;
    let chain_name = chain.chain_name.clone();

    let on_connect = move |_| {
        wallet_ctx.run(|manager, _| async move {
            manager.connect().await.map(|_| "Wallet connected".to_string())
        });
    };

    let on_switch = move |_| {
        wallet_ctx.run(|manager, _| async move {
            let name = manager.chain().chain_name.clone();
            manager.switch_to_target_chain().await.map(|report| match report.registered_endpoint {
                Some(rpc) => format!("Added {} via {} and switched", name, rpc),
                None => format!("Switched to {}", name),
            })
        });
    };

    let on_add_manually = move |_| {
        wallet_ctx.run(|manager, _| async move {
            let name = manager.chain().chain_name.clone();
            manager
                .switch_with_primary_endpoint()
                .await
                .map(|_| format!("{} added to wallet and selected", name))
        });
    };

    let on_refresh = move |_| {
        wallet_ctx.run(|manager, _| async move {
            manager.refresh().await.map(|_| "Balance refreshed".to_string())
        });
    };

    let on_disconnect = move |_| {
        wallet_ctx.manager().disconnect();
        wallet_ctx.notice.set(None);
        wallet_ctx.error.set(None);
    };

    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="width: 100%; max-width: 520px; padding: var(--spacing-xl);">
                <h1 class="card-title" style="text-align: center; margin-bottom: var(--spacing-md);">
                    "Wallet"
                </h1>

                {move || {
                    let state = wallet_ctx.state.get();
                    let busy = wallet_ctx.busy.get();

                    if !state.has_provider && !state.is_connected() {
                        return view! {
                            <div>
                                <p style="text-align: center; color: var(--text-secondary); margin-bottom: var(--spacing-lg);">
                                    "No wallet detected. Install or enable MetaMask, then connect."
                                </p>
                                <button class="btn" style="width: 100%;" disabled=busy on:click=on_connect>
                                    "Connect Wallet"
                                </button>
                            </div>
                        }.into_any();
                    }

                    match state.account.clone() {
                        None => view! {
                            <div>
                                <p style="text-align: center; color: var(--text-secondary); margin-bottom: var(--spacing-lg);">
                                    "Connect your wallet to continue"
                                </p>
                                <button class="btn" style="width: 100%;" disabled=busy on:click=on_connect>
                                    {if busy { "Connecting..." } else { "Connect Wallet" }}
                                </button>
                            </div>
                        }.into_any(),
                        Some(account) => {
                            let on_target = state.is_correct_chain(chain);
                            let network = chain_label(state.chain_id.as_deref(), chain);
                            let balance = format_balance(&state, chain);
                            let switch_label = format!("Switch to {}", chain_name);

                            view! {
                                <div>
                                    <div style="background: var(--bg-card); padding: var(--spacing-lg); border-radius: var(--border-radius); border: 1px solid var(--border-color); margin-bottom: var(--spacing-lg);">
                                        <p style="color: var(--text-secondary); margin-bottom: var(--spacing-sm);">"Account"</p>
                                        <p style="font-family: monospace; color: var(--text-primary); margin-bottom: var(--spacing-lg);" title=account.clone()>
                                            {truncate_address(&account)}
                                        </p>

                                        <p style="color: var(--text-secondary); margin-bottom: var(--spacing-sm);">"Network"</p>
                                        <p
                                            style="font-weight: bold; margin-bottom: var(--spacing-lg);"
                                            style:color=if on_target { "var(--price-up)" } else { "var(--price-down)" }
                                        >
                                            {network}
                                        </p>

                                        <p style="color: var(--text-secondary); margin-bottom: var(--spacing-sm);">"Balance"</p>
                                        <p style="font-family: monospace; color: var(--text-primary);">{balance}</p>
                                    </div>

                                    {(!on_target).then(|| view! {
                                        <button class="btn" style="width: 100%; margin-bottom: var(--spacing-sm);" disabled=busy on:click=on_switch>
                                            {switch_label}
                                        </button>
                                        <button class="btn btn-secondary" style="width: 100%; margin-bottom: var(--spacing-sm);" disabled=busy on:click=on_add_manually>
                                            "Add Network Manually"
                                        </button>
                                    })}

                                    <button class="btn btn-secondary" style="width: 100%; margin-bottom: var(--spacing-sm);" disabled=busy on:click=on_refresh>
                                        "Refresh Balance"
                                    </button>
                                    <button class="btn" style="width: 100%; background: var(--bg-error);" on:click=on_disconnect>
                                        "Disconnect"
                                    </button>
                                </div>
                            }.into_any()
                        }
                    }
                }}

                <ActionFeedback/>
            </div>
        </div>
    }
}

/// Last action's notice or error.
#[component]
pub fn ActionFeedback() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    view! {
        {move || wallet_ctx.error.get().map(|error| view! {
            <p class="error-message" style="color: var(--price-down); margin-top: var(--spacing-lg); word-break: break-word;">
                {error}
            </p>
        })}
        {move || wallet_ctx.notice.get().map(|notice| view! {
            <p style="color: var(--price-up); margin-top: var(--spacing-lg); word-break: break-word;">
                {notice}
            </p>
        })}
    }
}
