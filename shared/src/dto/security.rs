//! Security API DTOs

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by subscribe/unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionAck {
    pub ok: bool,
}

/// Protocols an address is subscribed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionsResponse {
    #[serde(default)]
    pub protocols: Vec<String>,
}

/// Error body produced by the API on failure (`{"detail": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}
