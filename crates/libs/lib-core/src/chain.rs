//! # Target Chain
//!
//! Static description of the network the wallet must be on, and the wire
//! payloads for `wallet_switchEthereumChain` / `wallet_addEthereumChain`
//! (EIP-3326 / EIP-3085).
//!
//! Several RPC endpoints are listed because any single host may be unreachable
//! or rate limited when the wallet validates a new network entry.

use serde::{Deserialize, Serialize};

/// Native currency of a chain, as wallets expect it during registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// The network the manager negotiates the wallet onto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetChainSpec {
    /// Numeric chain id (56 for BNB Smart Chain).
    pub chain_id: u64,
    /// Display name shown by the wallet.
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    /// Ordered RPC endpoint candidates, tried one at a time during registration.
    pub rpc_urls: Vec<String>,
    pub block_explorer_url: String,
}

/// `wallet_switchEthereumChain` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
    pub chain_id: String,
}

/// `wallet_addEthereumChain` parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl TargetChainSpec {
    /// BNB Smart Chain mainnet.
    pub fn bnb_smart_chain() -> Self {
        Self {
            chain_id: 56,
            chain_name: "BNB Smart Chain".to_string(),
            native_currency: NativeCurrency {
                name: "BNB".to_string(),
                symbol: "BNB".to_string(),
                decimals: 18,
            },
            rpc_urls: vec![
                "https://bsc-dataseed1.binance.org/".to_string(),
                "https://bsc-dataseed.binance.org/".to_string(),
                "https://bsc.nodereal.io/".to_string(),
            ],
            block_explorer_url: "https://bscscan.com/".to_string(),
        }
    }

    /// Replace the RPC endpoint candidates, keeping their order.
    pub fn with_rpc_urls(mut self, rpc_urls: Vec<String>) -> Self {
        self.rpc_urls = rpc_urls;
        self
    }

    /// Chain id as the `0x`-prefixed lowercase hex string wallets exchange.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// First RPC candidate, used by the single-endpoint registration path.
    pub fn primary_rpc_url(&self) -> Option<&str> {
        self.rpc_urls.first().map(String::as_str)
    }

    /// Whether a provider-reported chain id denotes this chain.
    ///
    /// Compared numerically, so `0x38` and `0x038` both match chain 56.
    /// Unparseable ids never match.
    pub fn is_chain(&self, reported: &str) -> bool {
        parse_chain_id(reported) == Some(self.chain_id)
    }

    pub fn switch_params(&self) -> SwitchEthereumChainParameter {
        SwitchEthereumChainParameter {
            chain_id: self.chain_id_hex(),
        }
    }

    /// Registration payload offering exactly the given RPC endpoints.
    pub fn registration_params(&self, rpc_urls: &[String]) -> AddEthereumChainParameter {
        AddEthereumChainParameter {
            chain_id: self.chain_id_hex(),
            chain_name: self.chain_name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_urls: rpc_urls.to_vec(),
            block_explorer_urls: vec![self.block_explorer_url.clone()],
        }
    }
}

impl Default for TargetChainSpec {
    fn default() -> Self {
        Self::bnb_smart_chain()
    }
}

/// Parse a hex (`0x38`) or decimal (`56`) chain id.
pub fn parse_chain_id(value: &str) -> Option<u64> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
