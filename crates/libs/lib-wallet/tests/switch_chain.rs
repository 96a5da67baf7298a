mod common;

use common::*;
use lib_core::{TargetChainSpec, WalletError};
use lib_wallet::{ChainSwitcher, SwitchState};
use serde_json::{json, Value};

const SWITCH: &str = "wallet_switchEthereumChain";
const ADD: &str = "wallet_addEthereumChain";

fn registered_rpc(params: &[Value]) -> Vec<String> {
    params[0]["rpcUrls"]
        .as_array()
        .expect("rpcUrls array")
        .iter()
        .map(|u| u.as_str().expect("rpc url").to_string())
        .collect()
}

#[tokio::test]
async fn test_known_chain_switches_without_registration() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(SWITCH, Ok(Value::Null));
    let manager = manager_for(&provider);

    let report = manager.switch_to_target_chain().await.unwrap();

    assert_eq!(report.path, vec![SwitchState::Switching, SwitchState::Success]);
    assert!(!report.needed_registration());
    assert_eq!(provider.call_count(SWITCH), 1);
    assert_eq!(provider.call_count(ADD), 0);
    assert_eq!(provider.calls(SWITCH)[0], vec![json!({ "chainId": "0x38" })]);
}

#[tokio::test]
async fn test_unrecognized_chain_is_registered_then_switched() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond(SWITCH, unrecognized_chain());
    provider.respond(SWITCH, Ok(Value::Null));
    provider.respond_default(ADD, Ok(Value::Null));
    let manager = manager_for(&provider);

    let report = manager.switch_to_target_chain().await.unwrap();

    assert_eq!(provider.call_count(ADD), 1);
    assert_eq!(provider.call_count(SWITCH), 2);
    assert_eq!(report.registration_calls, 1);
    assert_eq!(report.switch_calls, 2);
    assert_eq!(
        report.registered_endpoint.as_deref(),
        Some("https://bsc-dataseed1.binance.org/")
    );

    let add = &provider.calls(ADD)[0];
    assert_eq!(
        add[0],
        json!({
            "chainId": "0x38",
            "chainName": "BNB Smart Chain",
            "nativeCurrency": { "name": "BNB", "symbol": "BNB", "decimals": 18 },
            "rpcUrls": ["https://bsc-dataseed1.binance.org/"],
            "blockExplorerUrls": ["https://bscscan.com/"]
        })
    );
}

#[tokio::test]
async fn test_failed_registration_moves_to_next_endpoint() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond(SWITCH, unrecognized_chain());
    provider.respond(SWITCH, Ok(Value::Null));
    provider.respond(ADD, provider_error(-32603, "RPC endpoint unreachable"));
    provider.respond(ADD, Ok(Value::Null));
    let manager = manager_for(&provider);

    let report = manager.switch_to_target_chain().await.unwrap();

    assert_eq!(
        report.path,
        vec![
            SwitchState::Switching,
            SwitchState::NeedsRegistration,
            SwitchState::Registering { endpoint: 0 },
            SwitchState::RegistrationFailed { endpoint: 0 },
            SwitchState::Registering { endpoint: 1 },
            SwitchState::RegisteredThenSwitching { endpoint: 1 },
            SwitchState::Success,
        ]
    );
    assert_eq!(report.registered_endpoint.as_deref(), Some("https://bsc-dataseed.binance.org/"));
    assert_eq!(provider.call_count(ADD), 2);
}

#[tokio::test]
async fn test_every_endpoint_failing_exhausts_registration() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(SWITCH, unrecognized_chain());
    provider.respond_default(ADD, provider_error(-32603, "RPC endpoint unreachable"));
    let manager = manager_for(&provider);

    let err = manager.switch_to_target_chain().await.unwrap_err();

    match &err {
        WalletError::RegistrationExhausted {
            chain_name,
            attempted,
            last_error,
        } => {
            assert_eq!(chain_name, "BNB Smart Chain");
            assert_eq!(*attempted, 3);
            assert_eq!(last_error.message, "RPC endpoint unreachable");
        }
        other => panic!("expected RegistrationExhausted, got {:?}", other),
    }
    assert!(err.to_string().contains("after trying all 3 RPC endpoints"));

    let tried: Vec<String> = provider.calls(ADD).iter().flat_map(|p| registered_rpc(p)).collect();
    assert_eq!(
        tried,
        vec![
            "https://bsc-dataseed1.binance.org/",
            "https://bsc-dataseed.binance.org/",
            "https://bsc.nodereal.io/",
        ]
    );
    assert_eq!(provider.call_count(SWITCH), 1);
}

#[tokio::test]
async fn test_other_switch_failure_skips_registration() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(SWITCH, provider_error(-32002, "Request already pending"));
    let manager = manager_for(&provider);

    let err = manager.switch_to_target_chain().await.unwrap_err();

    assert!(matches!(err, WalletError::OtherFailure { .. }), "got {:?}", err);
    assert_eq!(err.provider_error().and_then(|e| e.code), Some(-32002));
    assert_eq!(provider.call_count(ADD), 0);
}

#[tokio::test]
async fn test_rejected_switch_is_user_rejection() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(SWITCH, provider_error(4001, "User rejected the request."));
    let manager = manager_for(&provider);

    let err = manager.switch_to_target_chain().await.unwrap_err();

    assert!(matches!(err, WalletError::UserRejected(_)), "got {:?}", err);
    assert_eq!(provider.call_count(ADD), 0);
}

#[tokio::test]
async fn test_switch_failing_after_registration_is_not_retried() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond(SWITCH, unrecognized_chain());
    provider.respond(SWITCH, provider_error(-32603, "Internal error"));
    provider.respond_default(ADD, Ok(Value::Null));
    let manager = manager_for(&provider);

    let err = manager.switch_to_target_chain().await.unwrap_err();

    match &err {
        WalletError::OtherFailure { context, source } => {
            assert!(context.contains("after adding it"), "context: {}", context);
            assert_eq!(source.code, Some(-32603));
        }
        other => panic!("expected OtherFailure, got {:?}", other),
    }
    assert_eq!(provider.call_count(ADD), 1);
    assert_eq!(provider.call_count(SWITCH), 2);
}

#[tokio::test]
async fn test_primary_endpoint_variant_tries_one_endpoint() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(SWITCH, unrecognized_chain());
    provider.respond_default(ADD, provider_error(-32603, "RPC endpoint unreachable"));
    let manager = manager_for(&provider);

    let err = manager.switch_with_primary_endpoint().await.unwrap_err();

    assert!(matches!(err, WalletError::RegistrationExhausted { attempted: 1, .. }), "got {:?}", err);
    assert_eq!(provider.call_count(ADD), 1);
    assert_eq!(registered_rpc(&provider.calls(ADD)[0]), vec!["https://bsc-dataseed1.binance.org/"]);
}

#[tokio::test]
async fn test_switch_without_wallet() {
    let manager = manager_without_wallet();
    let err = manager.switch_to_target_chain().await.unwrap_err();
    assert!(matches!(err, WalletError::ProviderUnavailable));
}

#[tokio::test]
async fn test_pending_clear_failure_is_ignored() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond("eth_chainId", provider_error(-32002, "Request already pending"));
    provider.respond_default(SWITCH, Ok(Value::Null));
    let manager = manager_for(&provider);

    manager.switch_to_target_chain().await.unwrap();

    let methods = provider.methods();
    assert_eq!(methods.first().map(String::as_str), Some("eth_chainId"));
    assert_eq!(provider.call_count(SWITCH), 1);
}

#[tokio::test]
async fn test_chain_id_is_refreshed_after_switch() {
    let provider = ScriptedProvider::on_bnb().with_events(EventSupport::Absent);
    provider.respond("eth_chainId", Ok(json!("0x1")));
    provider.respond("eth_chainId", Ok(json!("0x1")));
    provider.respond_default(SWITCH, Ok(Value::Null));
    let manager = manager_for(&provider);

    manager.start().await;
    assert!(!manager.is_correct_chain());

    manager.switch_to_target_chain().await.unwrap();
    assert!(manager.is_correct_chain());
    assert_eq!(manager.state().chain_id.as_deref(), Some("0x38"));
}

#[tokio::test]
async fn test_manual_add_offers_primary_endpoint_only() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(ADD, Ok(Value::Null));
    let manager = manager_for(&provider);

    assert!(manager.add_target_chain_manually().await.unwrap());

    let calls = provider.calls(ADD);
    assert_eq!(calls.len(), 1);
    assert_eq!(registered_rpc(&calls[0]), vec!["https://bsc-dataseed1.binance.org/"]);
    assert_eq!(provider.call_count(SWITCH), 0);
}

#[tokio::test]
async fn test_primary_endpoint_variant_registers_then_switches() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond(SWITCH, unrecognized_chain());
    provider.respond(SWITCH, Ok(Value::Null));
    provider.respond_default(ADD, Ok(Value::Null));
    let manager = manager_for(&provider);

    let report = manager.switch_with_primary_endpoint().await.unwrap();

    assert_eq!(report.registered_endpoint.as_deref(), Some("https://bsc-dataseed1.binance.org/"));
    let calls = provider.calls(ADD);
    assert_eq!(calls.len(), 1);
    assert_eq!(registered_rpc(&calls[0]).len(), 1);
    assert_eq!(provider.call_count(SWITCH), 2);
}

#[tokio::test]
async fn test_manual_add_failure() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond_default(ADD, provider_error(-32602, "Invalid chain parameters"));
    let manager = manager_for(&provider);

    let err = manager.add_target_chain_manually().await.unwrap_err();
    assert!(matches!(err, WalletError::OtherFailure { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_switcher_with_custom_endpoints() {
    let provider = ScriptedProvider::on_bnb();
    provider.respond(SWITCH, unrecognized_chain());
    provider.respond(SWITCH, Ok(Value::Null));
    provider.respond_default(ADD, Ok(Value::Null));
    let chain = TargetChainSpec::bnb_smart_chain().with_rpc_urls(vec!["https://rpc.example.org/".to_string()]);

    let switcher = ChainSwitcher::new(&provider, &chain);
    assert_eq!(switcher.state(), &SwitchState::Idle);

    let report = switcher.run(&chain.rpc_urls).await.unwrap();
    assert_eq!(report.registered_endpoint.as_deref(), Some("https://rpc.example.org/"));
    assert_eq!(report.path.last(), Some(&SwitchState::Success));
}
