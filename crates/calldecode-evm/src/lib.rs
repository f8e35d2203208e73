//! calldecode-evm — EVM calldata decoder built on alloy-rs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use calldecode_evm::EvmCallDecoder;
//! use calldecode_core::CallDecoder;
//!
//! let decoder = EvmCallDecoder::new();
//! let call = decoder.decode_hex(
//!     "0xa9059cbb\
//!      000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045\
//!      0000000000000000000000000000000000000000000000000000000000000064",
//! ).unwrap();
//! println!("{call}");  // "transfer(0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045, 100)"
//! ```

pub mod batch;
pub mod bundled;
pub mod decoder;
pub mod render;

pub use batch::{decode_batch, BatchSummary};
pub use decoder::{decode_params, EvmCallDecoder};
pub use render::{render, render_str};
