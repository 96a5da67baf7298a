//! Wallet Status Page - connected wallet info and exploit-alert subscriptions

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use lib_core::config::core_config;
use shared::utils::truncate_address;

use crate::pages::connect::ActionFeedback;
use crate::state::wallet::use_wallet_context;
use crate::utils::constants::SUGGESTED_PROTOCOLS;
use crate::utils::format::chain_label;

#[component]
pub fn StatusPage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let navigate = use_navigate();
    let chain = &core_config().chain;

    let (protocol, set_protocol) = signal(String::new());
    let subscriptions = RwSignal::new(Vec::<String>::new());

    // Not routed through `run`: an account switch must reload even while
    // another action holds the busy flag.
    let load_subscriptions = move |account: String| {
        subscriptions.set(Vec::new());
        let api = wallet_ctx.api();
        spawn_local(async move {
            let result = api.subscriptions(&account).await;
            if !wallet_ctx.state.with_untracked(|s| s.is_account(&account)) {
                return;
            }
            match result {
                Ok(protocols) => subscriptions.set(protocols),
                Err(e) => {
                    log::warn!("failed to load subscriptions: {}", e);
                    wallet_ctx.error.set(Some(e.to_string()));
                }
            }
        });
    };

    let account = Memo::new(move |_| wallet_ctx.account());
    Effect::new(move |_| match account.get() {
        Some(account) => load_subscriptions(account),
        None => subscriptions.set(Vec::new()),
    });

    let subscribe = move |name: String| {
        wallet_ctx.run(move |manager, api| async move {
            manager.subscribe_to_protocol(&api, &name).await.map(|_| {
                subscriptions.update(|list| {
                    if !list.contains(&name) {
                        list.push(name.clone());
                    }
                });
                format!("Subscribed to {} alerts", name)
            })
        });
    };

    let unsubscribe = move |name: String| {
        wallet_ctx.run(move |manager, api| async move {
            manager.unsubscribe_from_protocol(&api, &name).await.map(|_| {
                subscriptions.update(|list| list.retain(|p| p != &name));
                format!("Unsubscribed from {} alerts", name)
            })
        });
    };

    let on_disconnect = move |_| {
        wallet_ctx.manager().disconnect();
        navigate("/", Default::default());
    };

    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="width: 100%; max-width: 520px; padding: var(--spacing-xl);">
                <h1 class="card-title" style="text-align: center; margin-bottom: var(--spacing-md);">
                    "Wallet Status"
                </h1>

                {move || {
                    let state = wallet_ctx.state.get();
                    let Some(account) = state.account.clone() else {
                        return view! {
                            <div>
                                <p style="text-align: center; color: var(--text-secondary); margin-bottom: var(--spacing-lg);">
                                    "No wallet connected"
                                </p>
                                <a href="/" class="btn" style="width: 100%; display: block; text-align: center; text-decoration: none;">
                                    "Connect Wallet"
                                </a>
                            </div>
                        }.into_any();
                    };

                    view! {
                        <div>
                        <div style="background: var(--bg-card); padding: var(--spacing-lg); border-radius: var(--border-radius); border: 1px solid var(--border-color); margin-bottom: var(--spacing-lg);">
                            <p style="color: var(--text-secondary); margin-bottom: var(--spacing-sm);">"Wallet Address"</p>
                            <p style="font-family: monospace; color: var(--text-primary); word-break: break-all; font-size: 0.9em; margin-bottom: var(--spacing-lg);">
                                {account.clone()}
                            </p>
                            <p style="color: var(--text-secondary); margin-bottom: var(--spacing-sm);">"Network"</p>
                            <p style="color: var(--text-primary);">
                                {chain_label(state.chain_id.as_deref(), chain)}
                            </p>
                        </div>
                        <h2 style="color: var(--text-primary); margin-bottom: var(--spacing-sm);">
                            {format!("Exploit alerts for {}", truncate_address(&account))}
                        </h2>
                        </div>
                    }.into_any()
                }}

                {move || wallet_ctx.is_connected().then(|| view! {
                    <div>
                    <ul style="list-style: none; padding: 0; margin-bottom: var(--spacing-md);">
                        <For
                            each=move || subscriptions.get()
                            key=|name| name.clone()
                            children=move |name| {
                                let label = name.clone();
                                view! {
                                    <li style="display: flex; justify-content: space-between; align-items: center; margin-bottom: var(--spacing-sm);">
                                        <span style="color: var(--text-primary);">{label}</span>
                                        <button class="btn btn-secondary" on:click=move |_| unsubscribe(name.clone())>
                                            "Unsubscribe"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>

                    <div style="display: flex; gap: var(--spacing-sm); margin-bottom: var(--spacing-sm);">
                        <input
                            type="text"
                            class="input"
                            list="known-protocols"
                            placeholder="Protocol (e.g., pancakeswap)"
                            style="flex: 1;"
                            prop:value=protocol
                            on:input=move |ev| set_protocol.set(event_target_value(&ev))
                        />
                        <datalist id="known-protocols">
                            {SUGGESTED_PROTOCOLS.iter().map(|p| view! { <option value=*p/> }).collect_view()}
                        </datalist>
                        <button
                            class="btn"
                            disabled=move || wallet_ctx.busy.get()
                            on:click=move |_| {
                                let name = protocol.get_untracked().trim().to_lowercase();
                                if !name.is_empty() {
                                    set_protocol.set(String::new());
                                    subscribe(name);
                                }
                            }
                        >
                            "Subscribe"
                        </button>
                    </div>
                    <p style="color: var(--text-secondary); font-size: 0.85em; margin-bottom: var(--spacing-lg);">
                        "Subscribe to exploit alerts for a protocol"
                    </p>

                    <button class="btn" style="width: 100%; background: var(--bg-error);" on:click=on_disconnect.clone()>
                        "Disconnect Wallet"
                    </button>
                    </div>
                })}

                <ActionFeedback/>
            </div>
        </div>
    }
}
