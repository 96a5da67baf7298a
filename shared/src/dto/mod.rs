//! # Data Transfer Objects (DTOs)
//!
//! Structures exchanged with the security API over REST.
//!
//! ## Module Organization
//!
//! - [`security`] - Protocol exploit-alert subscriptions for a wallet address
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/security/subscribe?address=0x8894...&protocol=pancakeswap
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "ok": true }
//! ```

pub mod security;

pub use security::*;
