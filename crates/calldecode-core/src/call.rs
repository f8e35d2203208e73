//! Output types: rendered argument values and the decoded call record.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Message carried by records whose selector is not in the registry.
pub const UNKNOWN_SELECTOR: &str = "Unknown function selector";

// ─── RenderedValue ────────────────────────────────────────────────────────────

/// A display-ready argument value.
///
/// Serializes without tags: integers that fit 64 bits become JSON numbers,
/// wider ones decimal strings, tuples JSON objects keyed `_0`, `_1`, ….
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderedValue {
    Bool(bool),
    Uint(u64),
    /// Unsigned integers wider than 64 bits, as decimal.
    BigUint(String),
    Int(i64),
    /// Signed integers wider than 64 bits, as decimal.
    BigInt(String),
    Str(String),
    /// EIP-55 checksummed, `0x`-prefixed.
    Address(String),
    /// `0x` + lowercase hex.
    Bytes(String),
    Array(Vec<RenderedValue>),
    Tuple(IndexMap<String, RenderedValue>),
}

impl RenderedValue {
    /// Positional key of the `index`-th tuple member.
    fn tuple_key(index: usize) -> String {
        format!("_{index}")
    }

    /// Build a tuple from members in declaration order.
    pub fn tuple(members: impl IntoIterator<Item = RenderedValue>) -> Self {
        Self::Tuple(
            members
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Self::tuple_key(i), v))
                .collect(),
        )
    }

    pub fn as_address(&self) -> Option<&str> {
        match self {
            Self::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Look up a tuple member by its positional key (`"_0"`, …).
    pub fn member(&self, key: &str) -> Option<&RenderedValue> {
        match self {
            Self::Tuple(fields) => fields.get(key),
            _ => None,
        }
    }
}

impl fmt::Display for RenderedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::BigUint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Address(a) => write!(f, "{a}"),
            Self::Bytes(b) => write!(f, "{b}"),
            Self::Array(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Tuple(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

// ─── DecodedCall ──────────────────────────────────────────────────────────────

/// Result of decoding one calldata payload.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedCall {
    /// `0x` + 8 lowercase hex chars.
    pub selector: String,
    /// Whether the selector was found in the registry.
    pub known: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Top-level argument types, tuples and arrays kept intact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args_decoded: Option<Vec<RenderedValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecodedCall {
    /// Record for a selector the registry does not know.
    pub fn unknown(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            known: false,
            name: None,
            signature: None,
            arg_types: None,
            args_decoded: None,
            error: Some(UNKNOWN_SELECTOR.to_string()),
        }
    }

    /// Record for a recognised call with its rendered arguments.
    pub fn known(
        selector: impl Into<String>,
        name: impl Into<String>,
        signature: impl Into<String>,
        arg_types: Vec<String>,
        args_decoded: Vec<RenderedValue>,
    ) -> Self {
        Self {
            selector: selector.into(),
            known: true,
            name: Some(name.into()),
            signature: Some(signature.into()),
            arg_types: Some(arg_types),
            args_decoded: Some(args_decoded),
            error: None,
        }
    }

    /// Rendered arguments, empty for unknown calls.
    pub fn args(&self) -> &[RenderedValue] {
        self.args_decoded.as_deref().unwrap_or_default()
    }

    /// Look up the `index`-th decoded argument.
    pub fn arg(&self, index: usize) -> Option<&RenderedValue> {
        self.args().get(index)
    }
}

impl fmt::Display for DecodedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.known) {
            (Some(name), true) => {
                let args: Vec<_> = self.args().iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", name, args.join(", "))
            }
            _ => write!(
                f,
                "{}: {}",
                self.selector,
                self.error.as_deref().unwrap_or(UNKNOWN_SELECTOR)
            ),
        }
    }
}
