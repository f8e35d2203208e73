//! Parallel batch decoding.
//!
//! One failing payload never aborts the batch: every input gets its own
//! `Result`, in input order.

use calldecode_core::{CallDecoder, DecodeError, DecodedCall};
use rayon::prelude::*;
use tracing::info;

/// Decode many hex payloads in parallel. Output order matches input order.
pub fn decode_batch<D, S>(decoder: &D, inputs: &[S]) -> Vec<Result<DecodedCall, DecodeError>>
where
    D: CallDecoder + ?Sized,
    S: AsRef<str> + Sync,
{
    let results: Vec<_> = inputs
        .par_iter()
        .map(|hex_calldata| decoder.decode_hex(hex_calldata.as_ref()))
        .collect();

    let summary = BatchSummary::from_results(&results);
    info!(
        total = summary.total,
        decoded = summary.decoded,
        unknown = summary.unknown,
        failed = summary.failed,
        "batch decode complete"
    );
    results
}

/// Outcome counts of a batch decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    /// Known selector, arguments decoded.
    pub decoded: usize,
    /// Selector not in the registry.
    pub unknown: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<DecodedCall, DecodeError>]) -> Self {
        results.iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            match r {
                Ok(call) if call.known => s.decoded += 1,
                Ok(_) => s.unknown += 1,
                Err(_) => s.failed += 1,
            }
            s
        })
    }
}
