//! `window.ethereum` Integration via wasm-bindgen
//!
//! Binds the [`Eip1193Provider`] interface to the injected wallet object
//! through `js_sys::Reflect`, so a provider missing `on` or `removeListener`
//! surfaces as an unsupported-method error instead of a JS exception.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use lib_core::ProviderError;
use lib_wallet::{Eip1193Provider, Listener, ProviderEvent, ProviderHost};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    params: Vec<Value>,
}

/// A listener handed to the page, kept alive until it is removed.
struct Registration {
    event: ProviderEvent,
    listener: Listener,
    callback: Closure<dyn Fn(JsValue)>,
}

/// An injected EIP-1193 object.
#[derive(Clone)]
pub struct InjectedProvider {
    inner: JsValue,
    registrations: Rc<RefCell<Vec<Registration>>>,
}

impl InjectedProvider {
    pub fn new(inner: JsValue) -> Self {
        Self {
            inner,
            registrations: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn method(&self, name: &str) -> Result<Function, ProviderError> {
        Reflect::get(&self.inner, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| ProviderError::unsupported(name))
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for InjectedProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, ProviderError> {
        let request = self.method("request")?;

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let args = RequestArguments { method, params }
            .serialize(&serializer)
            .map_err(|e| ProviderError::new(None, e.to_string()))?;

        let returned = request.call1(&self.inner, &args).map_err(provider_error)?;
        let result = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(provider_error)?;

        if result.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result).map_err(|e| ProviderError::new(None, e.to_string()))
    }

    fn is_meta_mask(&self) -> bool {
        Reflect::get(&self.inner, &JsValue::from_str("isMetaMask"))
            .ok()
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false)
    }

    fn on(&self, event: ProviderEvent, listener: Listener) -> Result<(), ProviderError> {
        let on = self.method("on")?;

        let forward = listener.clone();
        let callback = Closure::<dyn Fn(JsValue)>::new(move |payload: JsValue| {
            let payload: Value = serde_wasm_bindgen::from_value(payload).unwrap_or(Value::Null);
            forward(&payload);
        });

        on.call2(
            &self.inner,
            &JsValue::from_str(event.name()),
            callback.as_ref().unchecked_ref(),
        )
        .map_err(provider_error)?;

        self.registrations.borrow_mut().push(Registration {
            event,
            listener,
            callback,
        });
        Ok(())
    }

    fn remove_listener(&self, event: ProviderEvent, listener: &Listener) -> Result<(), ProviderError> {
        let remove = self.method("removeListener")?;

        let mut registrations = self.registrations.borrow_mut();
        let Some(index) = registrations
            .iter()
            .position(|r| r.event == event && Rc::ptr_eq(&r.listener, listener))
        else {
            return Ok(());
        };

        remove
            .call2(
                &self.inner,
                &JsValue::from_str(event.name()),
                registrations[index].callback.as_ref().unchecked_ref(),
            )
            .map_err(provider_error)?;
        registrations.remove(index);
        Ok(())
    }

    fn remove_all_listeners(&self, event: ProviderEvent) -> Result<(), ProviderError> {
        let remove_all = self.method("removeAllListeners")?;
        remove_all
            .call1(&self.inner, &JsValue::from_str(event.name()))
            .map_err(provider_error)?;

        self.registrations.borrow_mut().retain(|r| r.event != event);
        Ok(())
    }
}

/// Wallets injected into the current page.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

impl BrowserHost {
    fn ethereum() -> Option<JsValue> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str("ethereum"))
            .ok()
            .filter(JsValue::is_object)
    }
}

impl ProviderHost for BrowserHost {
    type Provider = InjectedProvider;

    fn injected(&self) -> Option<InjectedProvider> {
        Self::ethereum().map(InjectedProvider::new)
    }

    fn injected_providers(&self) -> Vec<InjectedProvider> {
        let Some(ethereum) = Self::ethereum() else {
            return Vec::new();
        };
        match Reflect::get(&ethereum, &JsValue::from_str("providers")) {
            Ok(list) if Array::is_array(&list) => Array::from(&list)
                .iter()
                .filter(JsValue::is_object)
                .map(InjectedProvider::new)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Read `{ code, message }` off a rejected provider call.
fn provider_error(value: JsValue) -> ProviderError {
    let code = Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(&value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    ProviderError::new(code, message)
}
