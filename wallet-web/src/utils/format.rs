//! # Formatting Utilities for Wallet Web
//!
//! Display helpers specific to the wallet pages.
//! For address formatting, use [`shared::utils::truncate_address`].

use lib_core::chain::parse_chain_id;
use lib_core::TargetChainSpec;
use lib_wallet::ConnectionState;

use super::constants::{BALANCE_PRECISION, EXPLORER_TX_PATH};

/// Native balance with the chain's symbol, e.g. `"1.5000 BNB"`.
///
/// ```rust
/// use lib_core::TargetChainSpec;
/// use lib_wallet::ConnectionState;
/// use wallet_web::utils::format::format_balance;
///
/// let state = ConnectionState {
///     balance: Some("1500000000000000000".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(format_balance(&state, &TargetChainSpec::bnb_smart_chain()), "1.5000 BNB");
/// ```
pub fn format_balance(state: &ConnectionState, chain: &TargetChainSpec) -> String {
    match state.formatted_balance(BALANCE_PRECISION) {
        Some(amount) => format!("{} {}", amount, chain.native_currency.symbol),
        None => "-".to_string(),
    }
}

/// Human label for a reported chain id: the target's name, or the raw id.
pub fn chain_label(chain_id: Option<&str>, chain: &TargetChainSpec) -> String {
    match chain_id {
        Some(id) if chain.is_chain(id) => chain.chain_name.clone(),
        Some(id) => match parse_chain_id(id) {
            Some(numeric) => format!("Chain {} ({})", numeric, id),
            None => id.to_string(),
        },
        None => "Unknown".to_string(),
    }
}

/// Block explorer link for a submitted transaction.
pub fn explorer_tx_url(chain: &TargetChainSpec, hash: &str) -> String {
    let base = chain.block_explorer_url.trim_end_matches('/');
    format!("{}/{}{}", base, EXPLORER_TX_PATH, hash)
}
