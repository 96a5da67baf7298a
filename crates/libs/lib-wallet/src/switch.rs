//! # Chain Switch State Machine
//!
//! Drives the wallet onto the target chain:
//!
//! ```text
//! Idle → Switching ─┬─ ok ──────────────────────────────────────────→ Success
//!                   ├─ 4902 → NeedsRegistration
//!                   │          └─ for each RPC candidate:
//!                   │               Registering ─┬─ ok → RegisteredThenSwitching ─┬─ ok → Success
//!                   │                            │                               └─ err → OtherFailure
//!                   │                            └─ err → RegistrationFailed → (next candidate)
//!                   │          └─ no candidate left → RegistrationExhausted
//!                   └─ other → OtherFailure
//! ```
//!
//! A failed registration moves on to the next RPC endpoint. A switch that
//! fails after a successful registration ends the run.

use lib_core::{ProviderError, Result, TargetChainSpec, WalletError};
use tracing::{debug, info, warn};

use crate::provider::methods::{WALLET_ADD_ETHEREUM_CHAIN, WALLET_SWITCH_ETHEREUM_CHAIN};
use crate::provider::Eip1193Provider;

/// States visited by a [`ChainSwitcher`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Switching,
    NeedsRegistration,
    /// Adding the chain with the RPC candidate at `endpoint`.
    Registering { endpoint: usize },
    RegistrationFailed { endpoint: usize },
    RegisteredThenSwitching { endpoint: usize },
    Success,
    OtherFailure,
    RegistrationExhausted,
}

/// What a successful run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchReport {
    /// Every state entered, in order, starting after `Idle`.
    pub path: Vec<SwitchState>,
    pub switch_calls: usize,
    pub registration_calls: usize,
    /// RPC endpoint the chain was registered with, if registration was needed.
    pub registered_endpoint: Option<String>,
}

impl SwitchReport {
    pub fn needed_registration(&self) -> bool {
        self.registered_endpoint.is_some()
    }
}

/// One run of the switch/registration negotiation against a provider.
pub struct ChainSwitcher<'a, P: Eip1193Provider + ?Sized> {
    provider: &'a P,
    chain: &'a TargetChainSpec,
    state: SwitchState,
    report: SwitchReport,
}

impl<'a, P: Eip1193Provider + ?Sized> ChainSwitcher<'a, P> {
    pub fn new(provider: &'a P, chain: &'a TargetChainSpec) -> Self {
        Self {
            provider,
            chain,
            state: SwitchState::Idle,
            report: SwitchReport {
                path: Vec::new(),
                switch_calls: 0,
                registration_calls: 0,
                registered_endpoint: None,
            },
        }
    }

    pub fn state(&self) -> &SwitchState {
        &self.state
    }

    /// Switch to the chain, registering it with `candidates` (in order) if
    /// the wallet does not know it.
    pub async fn run(mut self, candidates: &[String]) -> Result<SwitchReport> {
        self.transition(SwitchState::Switching);
        let switch_error = match self.switch().await {
            Ok(()) => {
                self.transition(SwitchState::Success);
                info!(chain = %self.chain.chain_name, "switched chain");
                return Ok(self.report);
            }
            Err(e) => e,
        };

        if !switch_error.is_unrecognized_chain() {
            self.transition(SwitchState::OtherFailure);
            return Err(WalletError::from_provider(
                &format!("Failed to switch to {}", self.chain.chain_name),
                switch_error,
            ));
        }

        self.transition(SwitchState::NeedsRegistration);
        info!(chain = %self.chain.chain_name, candidates = candidates.len(), "chain unknown to wallet, adding it");

        let mut last_error = None;
        for (endpoint, rpc_url) in candidates.iter().enumerate() {
            self.transition(SwitchState::Registering { endpoint });

            if let Err(e) = self.register(rpc_url).await {
                warn!(endpoint = endpoint + 1, rpc_url = %rpc_url, error = %e, "chain registration failed");
                self.transition(SwitchState::RegistrationFailed { endpoint });
                last_error = Some(e);
                continue;
            }

            self.transition(SwitchState::RegisteredThenSwitching { endpoint });
            return match self.switch().await {
                Ok(()) => {
                    self.report.registered_endpoint = Some(rpc_url.clone());
                    self.transition(SwitchState::Success);
                    info!(chain = %self.chain.chain_name, rpc_url = %rpc_url, "added and switched chain");
                    Ok(self.report)
                }
                Err(e) => {
                    self.transition(SwitchState::OtherFailure);
                    Err(WalletError::from_provider(
                        &format!("Failed to switch to {} after adding it", self.chain.chain_name),
                        e,
                    ))
                }
            };
        }

        self.transition(SwitchState::RegistrationExhausted);
        Err(WalletError::RegistrationExhausted {
            chain_name: self.chain.chain_name.clone(),
            attempted: candidates.len(),
            last_error: last_error.unwrap_or_else(|| ProviderError::new(None, "No RPC endpoints configured")),
        })
    }

    fn transition(&mut self, next: SwitchState) {
        debug!(from = ?self.state, to = ?next, "chain switch transition");
        self.report.path.push(next.clone());
        self.state = next;
    }

    async fn switch(&mut self) -> std::result::Result<(), ProviderError> {
        self.report.switch_calls += 1;
        let params = serde_json::to_value(self.chain.switch_params())
            .map_err(|e| ProviderError::new(None, e.to_string()))?;
        self.provider
            .request(WALLET_SWITCH_ETHEREUM_CHAIN, vec![params])
            .await
            .map(|_| ())
    }

    async fn register(&mut self, rpc_url: &str) -> std::result::Result<(), ProviderError> {
        self.report.registration_calls += 1;
        let params = serde_json::to_value(self.chain.registration_params(&[rpc_url.to_string()]))
            .map_err(|e| ProviderError::new(None, e.to_string()))?;
        self.provider
            .request(WALLET_ADD_ETHEREUM_CHAIN, vec![params])
            .await
            .map(|_| ())
    }
}
