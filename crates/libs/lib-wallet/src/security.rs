//! # Security API Client
//!
//! REST client for protocol exploit-alert subscriptions. The backend keys
//! subscriptions by `(protocol, address)` and pushes alerts to subscribed
//! addresses when an exploit is reported.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | POST | `/api/security/subscribe?address=&protocol=` | `{"ok": true}` |
//! | POST | `/api/security/unsubscribe?address=&protocol=` | `{"ok": true}` |
//! | GET | `/api/security/subscriptions?address=` | `{"protocols": [...]}` |

use lib_core::{Result, WalletConfig, WalletError};
use lib_utils::validate_not_empty;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::dto::security::{ApiErrorResponse, SubscriptionAck, SubscriptionsResponse};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct SecurityApi {
    client: Client,
    base_url: String,
}

impl SecurityApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(config.api_base.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn subscribe(&self, address: &str, protocol: &str) -> Result<SubscriptionAck> {
        self.post_subscription("subscribe", address, protocol).await
    }

    pub async fn unsubscribe(&self, address: &str, protocol: &str) -> Result<SubscriptionAck> {
        self.post_subscription("unsubscribe", address, protocol).await
    }

    /// Protocols `address` is subscribed to.
    pub async fn subscriptions(&self, address: &str) -> Result<Vec<String>> {
        validate_not_empty(address, "Address").map_err(WalletError::InvalidAddress)?;

        let url = format!("{}/api/security/subscriptions", self.base_url);
        debug!(url = %url, address = %address, "listing subscriptions");

        let response = self.client.get(&url).query(&[("address", address)]).send().await?;
        let body: SubscriptionsResponse = handle_response(response).await?;
        Ok(body.protocols)
    }

    async fn post_subscription(&self, action: &str, address: &str, protocol: &str) -> Result<SubscriptionAck> {
        validate_not_empty(address, "Address").map_err(WalletError::InvalidAddress)?;
        validate_not_empty(protocol, "Protocol").map_err(WalletError::Api)?;

        let url = format!("{}/api/security/{}", self.base_url, action);
        debug!(url = %url, address = %address, protocol = %protocol, "posting subscription change");

        let response = self
            .client
            .post(&url)
            .query(&[("address", address), ("protocol", protocol)])
            .send()
            .await?;
        let ack: SubscriptionAck = handle_response(response).await?;

        if !ack.ok {
            return Err(WalletError::Api(format!("{} for {} was not acknowledged", action, protocol)));
        }
        info!(address = %address, protocol = %protocol, action, "subscription updated");
        Ok(ack)
    }
}

/// Decode a success body, or turn an error status into [`WalletError::Api`]
/// carrying the server's `detail` when it sent one.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiErrorResponse>(&text)
        .map(|body| body.detail)
        .unwrap_or(text);
    Err(WalletError::Api(format!("HTTP {}: {}", status.as_u16(), detail)))
}
