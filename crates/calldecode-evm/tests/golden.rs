//! Golden fixture integration tests for calldecode-evm.
//!
//! Each test loads a fixture JSON from `fixtures/calls/`, decodes the
//! `calldata` field with the bundled `EvmCallDecoder`, and asserts the
//! serialized record matches the fixture's `expected` object exactly.

use calldecode_core::{CallDecoder, DecodedCall, RenderedValue};
use calldecode_evm::{decode_batch, EvmCallDecoder};

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/calls");
    p.push(name);
    p
}

fn load_fixture(name: &str) -> serde_json::Value {
    let content = std::fs::read_to_string(fixture_path(name)).expect("fixture not found");
    serde_json::from_str(&content).expect("invalid fixture JSON")
}

fn decode_fixture(fixture: &serde_json::Value) -> DecodedCall {
    let hex_str = fixture["calldata"].as_str().expect("missing calldata");
    EvmCallDecoder::new().decode_hex(hex_str).expect("decode_hex failed")
}

fn assert_golden(name: &str) -> DecodedCall {
    let f = load_fixture(name);
    let decoded = decode_fixture(&f);
    let actual = serde_json::to_value(&decoded).expect("record serializes");
    assert_eq!(actual, f["expected"], "{name}: {}", f["description"]);
    decoded
}

// ─── Token calls ──────────────────────────────────────────────────────────────

#[test]
fn golden_erc20_transfer() {
    let decoded = assert_golden("erc20-transfer.json");
    assert_eq!(
        decoded.arg(0).and_then(RenderedValue::as_address),
        Some("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
    );
}

#[test]
fn golden_permit2_approve_wide_uint() {
    let decoded = assert_golden("permit2-approve.json");
    assert!(matches!(decoded.arg(2), Some(RenderedValue::BigUint(_))));
}

// ─── Nested tuples ────────────────────────────────────────────────────────────

#[test]
fn golden_uniswap_v4_swap() {
    let decoded = assert_golden("uniswap-v4-swap.json");
    let arg_types = decoded.arg_types.as_ref().unwrap();
    assert_eq!(arg_types.len(), 3);

    let pool_key = decoded.arg(0).unwrap();
    assert_eq!(pool_key.member("_2"), Some(&RenderedValue::Uint(3000)));
    let params = decoded.arg(1).unwrap();
    assert_eq!(params.member("_1"), Some(&RenderedValue::Int(-1_000_000_000_000_000_000)));
    assert_eq!(decoded.arg(2), Some(&RenderedValue::Bytes("0x".into())));
}

#[test]
fn golden_uniswap_v3_swap() {
    assert_golden("uniswap-v3-swap.json");
}

#[test]
fn golden_balancer_on_swap() {
    assert_golden("balancer-on-swap.json");
}

// ─── Arrays ───────────────────────────────────────────────────────────────────

#[test]
fn golden_execute_batch_tuple_array() {
    let decoded = assert_golden("execute-batch.json");
    match decoded.arg(0) {
        Some(RenderedValue::Array(items)) => assert_eq!(items.len(), 2),
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn golden_universal_router_execute() {
    assert_golden("universal-router-execute.json");
}

#[test]
fn golden_observe_uint32_array() {
    assert_golden("observe-uint32-array.json");
}

#[test]
fn golden_exttload_bytes32() {
    let decoded = assert_golden("exttload-bytes32.json");
    match decoded.arg(0) {
        Some(RenderedValue::Bytes(s)) => assert_eq!(s.len(), 66),
        other => panic!("expected bytes32, got {other:?}"),
    }
}

// ─── Unknown selector ─────────────────────────────────────────────────────────

#[test]
fn golden_unknown_selector() {
    let decoded = assert_golden("unknown-selector.json");
    assert!(!decoded.known);
}

// ─── Batch over every fixture ─────────────────────────────────────────────────

#[test]
fn golden_batch_matches_single_decodes() {
    let names = [
        "erc20-transfer.json",
        "uniswap-v4-swap.json",
        "execute-batch.json",
        "unknown-selector.json",
    ];
    let fixtures: Vec<_> = names.iter().map(|n| load_fixture(n)).collect();
    let inputs: Vec<&str> = fixtures
        .iter()
        .map(|f| f["calldata"].as_str().unwrap())
        .collect();

    let results = decode_batch(&EvmCallDecoder::new(), &inputs);
    for (f, r) in fixtures.iter().zip(results) {
        let actual = serde_json::to_value(r.unwrap()).unwrap();
        assert_eq!(actual, f["expected"]);
    }
}
