//! # Utilities Library
//!
//! Shared helpers for environment variables and input validation.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_list, get_env_or, get_env_parse};
pub use validation::{validate_decimal_amount, validate_evm_address, validate_http_url, validate_not_empty};
