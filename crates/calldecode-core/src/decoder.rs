//! The `CallDecoder` trait — implemented by the ABI backend crate.

use crate::call::DecodedCall;
use crate::error::DecodeError;

/// Number of hex characters in a function selector.
pub const SELECTOR_HEX_LEN: usize = 8;

/// Decodes calldata against a selector registry.
///
/// Implementations must be `Send + Sync` so one decoder can serve a whole
/// batch across threads.
pub trait CallDecoder: Send + Sync {
    /// Decode the argument payload `body` of a call to `selector`.
    ///
    /// Never returns `Err` for unknown selectors; those produce a record with
    /// `known = false`.
    fn decode_parts(&self, selector: [u8; 4], body: &[u8]) -> Result<DecodedCall, DecodeError>;

    /// Decode raw calldata bytes (selector followed by the ABI payload).
    fn decode(&self, calldata: &[u8]) -> Result<DecodedCall, DecodeError> {
        if calldata.len() < 4 {
            return Err(DecodeError::CalldataTooShort { len: calldata.len() * 2 });
        }
        let (selector, body) = calldata.split_at(4);
        let selector: [u8; 4] = selector
            .try_into()
            .map_err(|_| DecodeError::CalldataTooShort { len: calldata.len() * 2 })?;
        self.decode_parts(selector, body)
    }

    /// Convenience: decode from a hex string (with or without `0x` prefix).
    fn decode_hex(&self, hex_calldata: &str) -> Result<DecodedCall, DecodeError> {
        let trimmed = hex_calldata.trim();
        let stripped = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if stripped.len() < SELECTOR_HEX_LEN || !stripped.is_char_boundary(SELECTOR_HEX_LEN) {
            return Err(DecodeError::CalldataTooShort { len: stripped.len() });
        }

        let (selector_hex, body_hex) = stripped.split_at(SELECTOR_HEX_LEN);
        let mut selector = [0u8; 4];
        hex::decode_to_slice(selector_hex, &mut selector).map_err(|e| DecodeError::InvalidHex {
            reason: format!("selector '{selector_hex}': {e}"),
        })?;
        let body = hex::decode(body_hex).map_err(|e| DecodeError::InvalidHex {
            reason: format!("calldata body: {e}"),
        })?;
        self.decode_parts(selector, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::selector_hex;

    /// Echoes the split it was handed.
    struct Echo;

    impl CallDecoder for Echo {
        fn decode_parts(&self, selector: [u8; 4], body: &[u8]) -> Result<DecodedCall, DecodeError> {
            let mut call = DecodedCall::unknown(selector_hex(selector));
            call.error = Some(hex::encode(body));
            Ok(call)
        }
    }

    #[test]
    fn hex_prefix_and_case_are_normalized() {
        let call = Echo.decode_hex("0XA9059CBB00ff").unwrap();
        assert_eq!(call.selector, "0xa9059cbb");
        assert_eq!(call.error.as_deref(), Some("00ff"));

        let call = Echo.decode_hex("a9059cbb").unwrap();
        assert_eq!(call.error.as_deref(), Some(""));
    }

    #[test]
    fn short_calldata_is_rejected() {
        for input in ["", "0x", "0xa9059c", "a9059c"] {
            assert!(
                matches!(Echo.decode_hex(input), Err(DecodeError::CalldataTooShort { .. })),
                "{input:?}"
            );
        }
        assert!(matches!(
            Echo.decode(&[0xa9, 0x05]),
            Err(DecodeError::CalldataTooShort { len: 4 })
        ));
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!(Echo.decode_hex("0xzz059cbb"), Err(DecodeError::InvalidHex { .. })));
        assert!(matches!(Echo.decode_hex("0xa9059cbb0"), Err(DecodeError::InvalidHex { .. })));
    }

    #[test]
    fn raw_bytes_split() {
        let call = Echo.decode(&[0xa9, 0x05, 0x9c, 0xbb, 0x01]).unwrap();
        assert_eq!(call.selector, "0xa9059cbb");
        assert_eq!(call.error.as_deref(), Some("01"));
    }
}
