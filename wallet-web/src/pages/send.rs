//! Send Page - native transfer from the connected account

use leptos::prelude::*;
use lib_core::config::core_config;

use crate::pages::connect::ActionFeedback;
use crate::state::wallet::use_wallet_context;
use crate::utils::format::{explorer_tx_url, format_balance};

#[component]
pub fn SendPage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let chain = &core_config().chain;
    let symbol = chain.native_currency.symbol.clone();

    let (recipient, set_recipient) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (last_hash, set_last_hash) = signal(None::<String>);

    let on_send = move |_| {
        let to = recipient.get_untracked().trim().to_string();
        let value = amount.get_untracked().trim().to_string();
        set_last_hash.set(None);

        wallet_ctx.run(move |manager, _| async move {
            manager.send_transaction(&to, &value).await.map(|hash| {
                set_last_hash.set(Some(hash.clone()));
                format!("Transaction submitted: {}", hash)
            })
        });
    };

    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="width: 100%; max-width: 520px; padding: var(--spacing-xl);">
                <h1 class="card-title" style="text-align: center; margin-bottom: var(--spacing-md);">
                    {format!("Send {}", symbol)}
                </h1>

                {move || {
                    let state = wallet_ctx.state.get();
                    if !state.is_connected() {
                        return view! {
                            <p style="text-align: center; color: var(--text-secondary);">
                                "Connect your wallet to send funds"
                            </p>
                        }.into_any();
                    }
                    let wrong_chain = !state.is_correct_chain(chain);

                    view! {
                        <div>
                            <p style="color: var(--text-secondary); margin-bottom: var(--spacing-lg);">
                                "Available: " {format_balance(&state, chain)}
                            </p>
                            {wrong_chain.then(|| view! {
                                <p style="color: var(--price-down); margin-bottom: var(--spacing-lg);">
                                    {format!("Switch to {} before sending", chain.chain_name)}
                                </p>
                            })}
                        </div>
                    }.into_any()
                }}

                <label style="color: var(--text-secondary);">"Recipient"</label>
                <input
                    type="text"
                    class="input"
                    placeholder="0x..."
                    style="width: 100%; margin-bottom: var(--spacing-md); font-family: monospace;"
                    prop:value=recipient
                    on:input=move |ev| set_recipient.set(event_target_value(&ev))
                />

                <label style="color: var(--text-secondary);">"Amount"</label>
                <input
                    type="text"
                    class="input"
                    inputmode="decimal"
                    placeholder="0.0"
                    style="width: 100%; margin-bottom: var(--spacing-lg);"
                    prop:value=amount
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                />

                <button
                    class="btn"
                    style="width: 100%;"
                    disabled=move || wallet_ctx.busy.get() || !wallet_ctx.is_connected()
                    on:click=on_send
                >
                    {move || if wallet_ctx.busy.get() { "Confirm in wallet..." } else { "Send" }}
                </button>

                {move || last_hash.get().map(|hash| {
                    let url = explorer_tx_url(chain, &hash);
                    view! {
                        <a href=url target="_blank" rel="noopener" style="display: block; margin-top: var(--spacing-md); text-align: center;">
                            "View on explorer"
                        </a>
                    }
                })}

                <ActionFeedback/>
            </div>
        </div>
    }
}
