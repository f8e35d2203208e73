//! Converts alloy-core `DynSolValue` trees into display-ready `RenderedValue`s.
//!
//! Rendering walks the declared [`TypeTree`] and the decoded value in lock
//! step. Addresses come out EIP-55 checksummed, every `bytes`/`bytesN` value
//! as `0x`-prefixed lowercase hex, tuples as ordered `_0`, `_1`, … maps.

use alloy_core::dyn_abi::DynSolValue;
use calldecode_core::{DecodeError, RenderedValue, TypeTree};

/// Render a decoded value against its declared type.
///
/// # Errors
/// [`DecodeError::DecodingShape`] when the value does not have the shape the
/// type describes, e.g. a tuple with the wrong number of members.
pub fn render(ty: &TypeTree, value: &DynSolValue) -> Result<RenderedValue, DecodeError> {
    match ty {
        TypeTree::Array { elem, len } => {
            let items = match value {
                DynSolValue::Array(items) | DynSolValue::FixedArray(items) => items,
                other => return Err(shape(ty, other)),
            };
            if let Some(n) = len {
                if *n != items.len() {
                    return Err(DecodeError::DecodingShape {
                        expected: format!("{ty} ({n} elements)"),
                        got: format!("{} elements", items.len()),
                    });
                }
            }
            items
                .iter()
                .map(|item| render(elem, item))
                .collect::<Result<Vec<_>, _>>()
                .map(RenderedValue::Array)
        }

        TypeTree::Tuple(members) => {
            let values = match value {
                DynSolValue::Tuple(values) => values,
                other => return Err(shape(ty, other)),
            };
            if members.len() != values.len() {
                return Err(DecodeError::DecodingShape {
                    expected: format!("{ty} ({} members)", members.len()),
                    got: format!("{} values", values.len()),
                });
            }
            let rendered = members
                .iter()
                .zip(values)
                .map(|(member, v)| render(member, v))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RenderedValue::tuple(rendered))
        }

        TypeTree::Elementary(name) => render_elementary(ty, name, value),
    }
}

/// Parse `type_str` and render `value` against it.
pub fn render_str(type_str: &str, value: &DynSolValue) -> Result<RenderedValue, DecodeError> {
    render(&type_str.parse::<TypeTree>()?, value)
}

fn render_elementary(
    ty: &TypeTree,
    name: &str,
    value: &DynSolValue,
) -> Result<RenderedValue, DecodeError> {
    if name == "address" {
        return match value {
            DynSolValue::Address(a) => Ok(RenderedValue::Address(a.to_checksum(None))),
            other => Err(shape(ty, other)),
        };
    }

    if name.starts_with("bytes") {
        return match value {
            DynSolValue::Bytes(b) => Ok(hex_bytes(b)),
            // FixedBytes carries a 32-byte word; only the first `size` are data.
            DynSolValue::FixedBytes(word, size) => Ok(hex_bytes(&word[..(*size).min(32)])),
            other => Err(shape(ty, other)),
        };
    }

    match value {
        DynSolValue::Bool(b) => Ok(RenderedValue::Bool(*b)),
        DynSolValue::Uint(u, _) => Ok(u128::try_from(*u)
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .map_or_else(|| RenderedValue::BigUint(u.to_string()), RenderedValue::Uint)),
        DynSolValue::Int(i, _) => Ok(i128::try_from(*i)
            .ok()
            .and_then(|v| i64::try_from(v).ok())
            .map_or_else(|| RenderedValue::BigInt(i.to_string()), RenderedValue::Int)),
        DynSolValue::String(s) => Ok(RenderedValue::Str(s.clone())),
        DynSolValue::Function(f) => Ok(hex_bytes(f.as_slice())),
        other => Err(shape(ty, other)),
    }
}

fn hex_bytes(b: &[u8]) -> RenderedValue {
    RenderedValue::Bytes(format!("0x{}", hex::encode(b)))
}

fn shape(ty: &TypeTree, value: &DynSolValue) -> DecodeError {
    DecodeError::DecodingShape {
        expected: ty.to_string(),
        got: describe(value),
    }
}

/// Short description of a value's runtime shape for error messages.
fn describe(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(_) => "bool".into(),
        DynSolValue::Int(_, bits) => format!("int{bits}"),
        DynSolValue::Uint(_, bits) => format!("uint{bits}"),
        DynSolValue::FixedBytes(_, size) => format!("bytes{size}"),
        DynSolValue::Address(_) => "address".into(),
        DynSolValue::Function(_) => "function".into(),
        DynSolValue::Bytes(_) => "bytes".into(),
        DynSolValue::String(_) => "string".into(),
        DynSolValue::Array(items) => format!("array of {}", items.len()),
        DynSolValue::FixedArray(items) => format!("fixed array of {}", items.len()),
        DynSolValue::Tuple(items) => format!("tuple of {}", items.len()),
        #[allow(unreachable_patterns)]
        _ => "value".into(),
    }
}
