//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;
use shared::utils::truncate_address;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <div style="display: flex; gap: 24px; align-items: center;">
                    <A href="/" attr:class="nav-link-clean">
                        <span class="nav-title">"Sentinel"</span>
                    </A>
                    <A href="/send" attr:class="nav-link-clean">"Send"</A>
                    <A href="/status" attr:class="nav-link-clean">"Alerts"</A>
                </div>
                <span style="font-family: monospace;">
                    {move || {
                        let connected = wallet_ctx.account().map(|account| truncate_address(&account));
                        let network = if wallet_ctx.is_correct_chain() { "" } else { " (wrong network)" };
                        match connected {
                            Some(account) => format!("{}{}", account, network),
                            None => "Not connected".to_string(),
                        }
                    }}
                </span>
            </div>
        </nav>
    }
}
