//! Browser wallet front end for the Sentinel dashboard.
//!
//! Hosts one `WalletManager` bound to `window.ethereum` and renders its state.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    if let Err(e) = lib_core::config::init_config() {
        log::warn!("invalid wallet configuration, using defaults: {}", e);
    }
    log::info!("wallet front end starting");

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading placeholder once WASM is running.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document available");
        return;
    };
    let Some(loading) = document.get_element_by_id("leptos-loading") else {
        return;
    };

    if let Some(element) = loading.dyn_ref::<HtmlElement>() {
        element.class_list().add_1("hidden").ok();
    }
    loading.set_attribute("style", "display: none !important;").ok();
}
