//! `EvmCallDecoder` — the top-level EVM calldata decoder.
//!
//! Decode flow:
//! 1. Selector not in registry       → record with `known = false`
//! 2. Signature with no arguments    → record with empty argument lists
//! 3. Otherwise                      → split types, ABI-decode the body with
//!    alloy, render each top-level argument

use std::sync::Arc;

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use calldecode_core::registry::{selector_hex, SelectorEntry, SelectorRegistry};
use calldecode_core::{extract_types, CallDecoder, DecodeError, DecodedCall, TypeTree};
use tracing::{debug, error};

use crate::bundled;
use crate::render::render;

/// EVM calldata decoder over a selector registry.
///
/// # Usage
/// ```rust,no_run
/// use calldecode_evm::EvmCallDecoder;
/// use calldecode_core::CallDecoder;
///
/// let decoder = EvmCallDecoder::new();
/// let call = decoder.decode_hex("0xd0e30db0").unwrap();
/// println!("{call}");  // "deposit()"
/// ```
#[derive(Clone)]
pub struct EvmCallDecoder {
    registry: Arc<dyn SelectorRegistry>,
}

impl EvmCallDecoder {
    /// Create a decoder over the bundled selector registry.
    pub fn new() -> Self {
        Self { registry: bundled::registry() }
    }

    /// Create a decoder with a custom registry.
    pub fn with_registry(registry: Arc<dyn SelectorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &dyn SelectorRegistry {
        self.registry.as_ref()
    }

    fn decode_known(
        &self,
        selector: String,
        entry: &SelectorEntry,
        body: &[u8],
    ) -> Result<DecodedCall, DecodeError> {
        let arg_types = extract_types(&entry.signature).map_err(|e| {
            error!(selector = %selector, signature = %entry.signature, "malformed registry signature");
            e
        })?;

        if arg_types.is_empty() {
            return Ok(DecodedCall::known(selector, &entry.name, &entry.signature, vec![], vec![]));
        }

        let trees = arg_types
            .iter()
            .map(|t| TypeTree::parse(t))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| {
                error!(selector = %selector, signature = %entry.signature, "unparseable argument type in registry signature");
                DecodeError::MalformedSignature { signature: entry.signature.clone() }
            })?;

        let values = decode_params(&trees, body).map_err(|e| match e {
            DecodeError::MalformedSignature { signature: ty } => {
                error!(selector = %selector, signature = %entry.signature, arg_type = %ty, "argument type rejected by ABI decoder");
                DecodeError::MalformedSignature { signature: entry.signature.clone() }
            }
            other => other,
        })?;
        if values.len() != trees.len() {
            return Err(DecodeError::DecodingShape {
                expected: format!("{} arguments", trees.len()),
                got: format!("{} values", values.len()),
            });
        }

        let args_decoded = trees
            .iter()
            .zip(&values)
            .map(|(ty, v)| render(ty, v))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DecodedCall::known(selector, &entry.name, &entry.signature, arg_types, args_decoded))
    }
}

impl Default for EvmCallDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CallDecoder for EvmCallDecoder {
    fn decode_parts(&self, selector: [u8; 4], body: &[u8]) -> Result<DecodedCall, DecodeError> {
        let selector_str = selector_hex(selector);
        match self.registry.get(selector) {
            Some(entry) => {
                debug!(selector = %selector_str, signature = %entry.signature, body_len = body.len(), "decoding call");
                self.decode_known(selector_str, entry, body)
            }
            None => {
                debug!(selector = %selector_str, "unknown function selector");
                Ok(DecodedCall::unknown(selector_str))
            }
        }
    }
}

/// ABI-decode a function argument payload against its top-level types.
///
/// # Errors
/// [`DecodeError::MalformedSignature`] carrying the offending type string if
/// alloy cannot parse a type, [`DecodeError::AbiDecodeFailed`] if the payload
/// does not match the types.
pub fn decode_params(types: &[TypeTree], body: &[u8]) -> Result<Vec<DynSolValue>, DecodeError> {
    let sol_types = types
        .iter()
        .map(|t| {
            let canonical = t.to_string();
            canonical.parse::<DynSolType>().map_err(|e| {
                debug!(arg_type = %canonical, error = %e, "unsupported ABI type");
                DecodeError::MalformedSignature { signature: canonical.clone() }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let decoded = DynSolType::Tuple(sol_types)
        .abi_decode_params(body)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            reason: format!("function input decode: {e}"),
        })?;

    Ok(match decoded {
        DynSolValue::Tuple(vals) => vals,
        single => vec![single],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calldecode_core::{MemorySelectorRegistry, RenderedValue, UNKNOWN_SELECTOR};

    fn word(hex_str: &str) -> String {
        format!("{hex_str:0>64}")
    }

    fn decoder_with(signatures: &[&str]) -> EvmCallDecoder {
        let mut reg = MemorySelectorRegistry::new();
        for sig in signatures {
            reg.insert_signature(sig).unwrap();
        }
        EvmCallDecoder::with_registry(Arc::new(reg))
    }

    #[test]
    fn decode_transfer() {
        let data = format!("0xa9059cbb{}{}", word("1"), word("64"));
        let call = EvmCallDecoder::new().decode_hex(&data).unwrap();
        assert!(call.known);
        assert_eq!(call.name.as_deref(), Some("transfer"));
        assert_eq!(call.arg_types, Some(vec!["address".to_string(), "uint256".to_string()]));
        assert_eq!(
            call.args(),
            &[
                RenderedValue::Address("0x0000000000000000000000000000000000000001".into()),
                RenderedValue::Uint(100),
            ]
        );
    }

    #[test]
    fn decode_unknown_selector() {
        let call = EvmCallDecoder::new().decode_hex("0xdeadbeef00").unwrap();
        assert!(!call.known);
        assert_eq!(call.selector, "0xdeadbeef");
        assert_eq!(call.error.as_deref(), Some(UNKNOWN_SELECTOR));
    }

    #[test]
    fn decode_no_arg_function_ignores_body() {
        let call = EvmCallDecoder::new().decode_hex("0xD0E30DB0").unwrap();
        assert!(call.known);
        assert_eq!(call.name.as_deref(), Some("deposit"));
        assert_eq!(call.arg_types, Some(vec![]));
        assert_eq!(call.args_decoded, Some(vec![]));
        assert_eq!(call.to_string(), "deposit()");
    }

    #[test]
    fn decode_truncated_body_fails() {
        let data = format!("0xa9059cbb{}", word("1"));
        let err = EvmCallDecoder::new().decode_hex(&data).unwrap_err();
        assert!(matches!(err, DecodeError::AbiDecodeFailed { .. }), "{err}");
    }

    #[test]
    fn decode_static_tuple_argument() {
        let dec = decoder_with(&["check((bool,int256,uint160))"]);
        let sel = calldecode_core::selector_of("check((bool,int256,uint160))");
        let data = format!(
            "0x{}{}{}{}",
            hex::encode(sel),
            word("1"),
            "f".repeat(63) + "b",
            word("a"),
        );
        let call = dec.decode_hex(&data).unwrap();
        assert_eq!(
            serde_json::to_string(&call.args_decoded).unwrap(),
            r#"[{"_0":true,"_1":-5,"_2":10}]"#
        );
    }

    #[test]
    fn decode_dynamic_array_argument() {
        // observe(uint32[]) with [0, 60]
        let data = format!(
            "0x883bdbfd{}{}{}{}",
            word("20"),
            word("2"),
            word("0"),
            word("3c"),
        );
        let call = EvmCallDecoder::new().decode_hex(&data).unwrap();
        assert_eq!(
            call.args(),
            &[RenderedValue::Array(vec![RenderedValue::Uint(0), RenderedValue::Uint(60)])]
        );
    }

    #[test]
    fn malformed_registry_signature_is_reported() {
        let mut reg = MemorySelectorRegistry::new();
        reg.insert([1, 2, 3, 4], calldecode_core::SelectorEntry::new("broken", "broken(uint256"));
        let dec = EvmCallDecoder::with_registry(Arc::new(reg));
        let err = dec.decode_hex("0x01020304").unwrap_err();
        assert!(err.is_registry_fault());
    }

    #[test]
    fn unknown_elementary_type_is_malformed() {
        let mut reg = MemorySelectorRegistry::new();
        reg.insert([1, 2, 3, 4], calldecode_core::SelectorEntry::new("odd", "odd(notatype)"));
        let dec = EvmCallDecoder::with_registry(Arc::new(reg));
        let err = dec.decode_hex(&format!("0x01020304{}", word("1"))).unwrap_err();
        match err {
            DecodeError::MalformedSignature { signature } => assert_eq!(signature, "odd(notatype)"),
            other => panic!("expected MalformedSignature, got {other}"),
        }
    }

    #[test]
    fn decode_params_reports_the_rejected_type() {
        let trees = vec![
            TypeTree::parse("uint256").unwrap(),
            TypeTree::parse("(bool,notatype)[]").unwrap(),
        ];
        match decode_params(&trees, &[]).unwrap_err() {
            DecodeError::MalformedSignature { signature } => {
                assert_eq!(signature, "(bool,notatype)[]")
            }
            other => panic!("expected MalformedSignature, got {other}"),
        }
    }
}
