//! Solidity type-string parsing.
//!
//! Signatures in the selector registry carry their argument types as plain
//! text, e.g. `swap((address,address,uint24,int24,address),(bool,int256,uint160),bytes)`.
//! This module splits that text into top-level argument types and turns each
//! one into an explicit [`TypeTree`] so rendering never re-parses strings.

use std::fmt;

use crate::error::DecodeError;

/// Split a type list at top-level commas, keeping tuples and arrays intact.
///
/// `"(address,uint24),(bool,int256),bytes"` → `["(address,uint24)", "(bool,int256)", "bytes"]`
///
/// Only commas at parenthesis depth 0 separate entries. Brackets are not
/// tracked: array dimensions never contain commas. Unbalanced parentheses are
/// not reported here; [`extract_types`] checks balance before splitting.
pub fn split_top_level(type_list: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut depth: i32 = 0;

    for ch in type_list.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(buf.trim().to_string());
                buf.clear();
                continue;
            }
            _ => {}
        }
        buf.push(ch);
    }
    if !buf.is_empty() {
        parts.push(buf.trim().to_string());
    }

    parts.retain(|p| !p.is_empty());
    parts
}

/// Extract the top-level argument types of a full function signature.
///
/// The name never contains `(`, so the argument list always spans from the
/// first `(` to the last `)`.
///
/// # Errors
/// Returns [`DecodeError::MalformedSignature`] when either parenthesis is
/// missing, they are out of order, or the argument list is unbalanced.
pub fn extract_types(signature: &str) -> Result<Vec<String>, DecodeError> {
    let (l, r) = match (signature.find('('), signature.rfind(')')) {
        (Some(l), Some(r)) if r > l => (l, r),
        _ => return Err(DecodeError::malformed(signature)),
    };

    let inner = signature[l + 1..r].trim();
    if inner.is_empty() {
        return Ok(vec![]);
    }
    if !is_balanced(inner) {
        return Err(DecodeError::malformed(signature));
    }
    Ok(split_top_level(inner))
}

/// The function name of a signature: the trimmed text before the first `(`.
pub fn function_name(signature: &str) -> Result<&str, DecodeError> {
    let name = signature
        .find('(')
        .map(|l| signature[..l].trim())
        .ok_or_else(|| DecodeError::malformed(signature))?;
    if name.is_empty() {
        return Err(DecodeError::malformed(signature));
    }
    Ok(name)
}

fn is_balanced(s: &str) -> bool {
    let mut depth: i32 = 0;
    for ch in s.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

// ─── TypeTree ─────────────────────────────────────────────────────────────────

/// Structural form of a Solidity type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTree {
    /// `address`, `bool`, `uint256`, `bytes32`, `bytes`, `string`, …
    Elementary(String),
    /// `(T1,T2,...)` — members in declaration order.
    Tuple(Vec<TypeTree>),
    /// `T[]` (`len = None`) or `T[k]`.
    Array {
        elem: Box<TypeTree>,
        len: Option<usize>,
    },
}

impl TypeTree {
    /// Parse a type string. Whitespace anywhere in the input is ignored.
    ///
    /// The rightmost `[...]` is the outermost dimension, so `uint8[2][]` is a
    /// dynamic array whose elements are `uint8[2]`.
    pub fn parse(type_str: &str) -> Result<Self, DecodeError> {
        let t: String = type_str.chars().filter(|c| !c.is_whitespace()).collect();
        Self::parse_normalized(&t).ok_or_else(|| DecodeError::malformed(type_str))
    }

    fn parse_normalized(t: &str) -> Option<Self> {
        if let Some(head) = t.strip_suffix(']') {
            let open = head.rfind('[')?;
            let base = &head[..open];
            let dim = &head[open + 1..];
            let len = if dim.is_empty() { None } else { Some(dim.parse().ok()?) };
            return Some(Self::Array {
                elem: Box::new(Self::parse_normalized(base)?),
                len,
            });
        }

        if let Some(inner) = t.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            if !is_balanced(inner) {
                return None;
            }
            let members = split_top_level(inner)
                .iter()
                .map(|m| Self::parse_normalized(m))
                .collect::<Option<Vec<_>>>()?;
            return Some(Self::Tuple(members));
        }

        let valid = !t.is_empty()
            && t.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        valid.then(|| Self::Elementary(t.to_string()))
    }

    /// Nesting depth: 0 for elementary types.
    pub fn depth(&self) -> usize {
        match self {
            Self::Elementary(_) => 0,
            Self::Array { elem, .. } => 1 + elem.depth(),
            Self::Tuple(members) => 1 + members.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    pub fn is_elementary(&self) -> bool {
        matches!(self, Self::Elementary(_))
    }
}

impl fmt::Display for TypeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elementary(name) => write!(f, "{name}"),
            Self::Tuple(members) => {
                let parts: Vec<_> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "({})", parts.join(","))
            }
            Self::Array { elem, len: Some(n) } => write!(f, "{elem}[{n}]"),
            Self::Array { elem, len: None } => write!(f, "{elem}[]"),
        }
    }
}

impl std::str::FromStr for TypeTree {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
