//! # Shared Data Transfer Objects Library
//!
//! Contract between the wallet host and the security API, plus display helpers.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::security`]**: Protocol subscription responses
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior (snake_case
//! field names), matching what the security API returns.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::security::SubscriptionsResponse;
//! use shared::utils::truncate_address;
//!
//! let body = r#"{ "protocols": ["pancakeswap", "venus"] }"#;
//! let response: SubscriptionsResponse = serde_json::from_str(body).unwrap();
//! assert_eq!(response.protocols.len(), 2);
//!
//! let display = truncate_address("0x8894E0a0c962CB723c1976a4421c95949bE2D4E3");
//! assert_eq!(display, "0x8894...D4E3");
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: everything in this crate is public API
pub use dto::*;
pub use utils::*;
