//! Function selector registry — maps 4-byte selectors to known signatures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tiny_keccak::{Hasher, Keccak};
use tracing::warn;

use crate::error::DecodeError;

/// A known function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorEntry {
    /// Function name (e.g. `"transfer"`).
    pub name: String,
    /// Full signature string (e.g. `"transfer(address,uint256)"`).
    pub signature: String,
}

impl SelectorEntry {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self { name: name.into(), signature: signature.into() }
    }
}

/// Compute the 4-byte selector of a canonical signature: `keccak256(sig)[..4]`.
pub fn selector_of(signature: &str) -> [u8; 4] {
    let mut k = Keccak::v256();
    k.update(signature.as_bytes());
    let mut out = [0u8; 32];
    k.finalize(&mut out);
    [out[0], out[1], out[2], out[3]]
}

/// Parse a selector written as hex, in either case, with or without `0x`.
pub fn parse_selector(selector_hex: &str) -> Option<[u8; 4]> {
    let s = selector_hex.trim();
    let s = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if s.len() != 8 {
        return None;
    }
    let mut out = [0u8; 4];
    hex::decode_to_slice(s, &mut out).ok()?;
    Some(out)
}

/// Format a selector the way decoded records carry it: `0x` + lowercase hex.
pub fn selector_hex(selector: [u8; 4]) -> String {
    format!("0x{}", hex::encode(selector))
}

/// Read-only lookup of function signatures by selector.
///
/// Registries are built once and shared across threads afterwards.
pub trait SelectorRegistry: Send + Sync {
    /// Look up the signature registered for a selector.
    fn get(&self, selector: [u8; 4]) -> Option<&SelectorEntry>;

    /// Total number of registered selectors.
    fn len(&self) -> usize;

    /// Returns `true` if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up by hex selector (`"0xA9059CBB"`, `"a9059cbb"`, …).
    fn get_hex(&self, selector_hex: &str) -> Option<&SelectorEntry> {
        parse_selector(selector_hex).and_then(|s| self.get(s))
    }
}

// ─── In-memory registry ───────────────────────────────────────────────────────

/// A registry backed by `HashMap`, populated before it is shared.
#[derive(Debug, Clone, Default)]
pub struct MemorySelectorRegistry {
    entries: HashMap<[u8; 4], SelectorEntry>,
}

impl MemorySelectorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(selector, entry)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = ([u8; 4], SelectorEntry)>) -> Self {
        let mut reg = Self::new();
        for (selector, entry) in entries {
            reg.insert(selector, entry);
        }
        reg
    }

    /// Register an entry. The first registration of a selector wins.
    ///
    /// Returns `false` when the selector was already taken.
    pub fn insert(&mut self, selector: [u8; 4], entry: SelectorEntry) -> bool {
        if let Some(existing) = self.entries.get(&selector) {
            if existing != &entry {
                warn!(
                    selector = %selector_hex(selector),
                    kept = %existing.signature,
                    ignored = %entry.signature,
                    "duplicate selector registration ignored"
                );
            }
            return false;
        }
        self.entries.insert(selector, entry);
        true
    }

    /// Register an entry under a hex selector key.
    pub fn insert_hex(&mut self, selector_hex: &str, entry: SelectorEntry) -> Result<bool, DecodeError> {
        let selector = parse_selector(selector_hex).ok_or_else(|| DecodeError::InvalidHex {
            reason: format!("invalid selector key '{selector_hex}'"),
        })?;
        Ok(self.insert(selector, entry))
    }

    /// Register a signature under its computed keccak selector.
    pub fn insert_signature(&mut self, signature: &str) -> Result<bool, DecodeError> {
        let name = crate::typestr::function_name(signature)?.to_string();
        Ok(self.insert(selector_of(signature), SelectorEntry::new(name, signature)))
    }

    /// Load entries from a JSON object keyed by hex selector:
    /// `{ "0xa9059cbb": { "name": "transfer", "signature": "transfer(address,uint256)" } }`
    ///
    /// Returns the number of newly registered selectors.
    pub fn load_json(&mut self, json: &str) -> Result<usize, DecodeError> {
        let raw: BTreeMap<String, SelectorEntry> = serde_json::from_str(json)?;
        let mut added = 0;
        for (key, entry) in raw {
            if self.insert_hex(&key, entry)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Iterate over `(selector, entry)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8; 4], &SelectorEntry)> {
        self.entries.iter()
    }
}

impl SelectorRegistry for MemorySelectorRegistry {
    fn get(&self, selector: [u8; 4]) -> Option<&SelectorEntry> {
        self.entries.get(&selector)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
