//! Application constants

/// Fractional digits shown for native balances.
pub const BALANCE_PRECISION: usize = 4;

/// Protocols offered for exploit-alert subscriptions.
pub const SUGGESTED_PROTOCOLS: &[&str] = &["pancakeswap", "venus", "alpaca", "biswap"];

/// Explorer path for a transaction hash, appended to the chain's explorer URL.
pub const EXPLORER_TX_PATH: &str = "tx/";
