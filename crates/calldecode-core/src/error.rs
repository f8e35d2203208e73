//! Error types for the calldata decode pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single call.
///
/// A registry miss is not an error: it is reported as `known = false` on the
/// [`DecodedCall`](crate::call::DecodedCall) record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A registry signature has no usable `(...)` argument section.
    #[error("Malformed signature: {signature}")]
    MalformedSignature { signature: String },

    #[error("Calldata too short to contain a selector: {len} hex chars")]
    CalldataTooShort { len: usize },

    #[error("Invalid hex: {reason}")]
    InvalidHex { reason: String },

    /// The ABI decoder rejected the argument payload.
    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },

    /// Decoded value does not have the shape its declared type describes.
    #[error("Decoded value shape mismatch: expected {expected}, got {got}")]
    DecodingShape { expected: String, got: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn malformed(signature: impl Into<String>) -> Self {
        Self::MalformedSignature { signature: signature.into() }
    }

    /// Returns `true` if the fault lies in registry data rather than caller input.
    pub fn is_registry_fault(&self) -> bool {
        matches!(self, Self::MalformedSignature { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = DecodeError::CalldataTooShort { len: 4 };
        assert_eq!(e.to_string(), "Calldata too short to contain a selector: 4 hex chars");

        let e = DecodeError::malformed("transfer");
        assert_eq!(e.to_string(), "Malformed signature: transfer");
        assert!(e.is_registry_fault());
    }

    #[test]
    fn shape_error_is_not_registry_fault() {
        let e = DecodeError::DecodingShape {
            expected: "3 tuple members".into(),
            got: "2 values".into(),
        };
        assert!(!e.is_registry_fault());
    }
}
