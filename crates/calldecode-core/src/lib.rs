//! calldecode-core — foundation types and traits for the calldecode library.
//!
//! This crate defines:
//! - [`split_top_level`] / [`extract_types`] — the signature type-list parser
//! - [`TypeTree`] — the structural form of a Solidity type string
//! - [`RenderedValue`] / [`DecodedCall`] — the output of a decode
//! - [`SelectorRegistry`] — the trait for looking up function signatures
//! - [`CallDecoder`] — the decoder trait the ABI backend implements

pub mod call;
pub mod decoder;
pub mod error;
pub mod registry;
pub mod typestr;

pub use call::{DecodedCall, RenderedValue, UNKNOWN_SELECTOR};
pub use decoder::CallDecoder;
pub use error::DecodeError;
pub use registry::{selector_of, MemorySelectorRegistry, SelectorEntry, SelectorRegistry};
pub use typestr::{extract_types, function_name, split_top_level, TypeTree};
