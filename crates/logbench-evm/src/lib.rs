//! # logbench-evm
//!
//! EVM log decoders implementing the `LogDecoder` contract.
//!
//! ## Implementation notes
//! - topics[0] → event signature hash, routed through the schema table
//! - topics[1..] → indexed parameters (one 32-byte word each)
//! - `data` → non-indexed parameters, one 32-byte stride each
//!
//! `StrideDecoder` reads words directly; `DynAbiDecoder` resolves every
//! parameter through alloy's runtime `DynSolType` on each call. Both must
//! agree on every well-formed log.

pub mod decoder;
pub mod linked;
pub mod normalizer;
pub mod stride;

pub use decoder::DynAbiDecoder;
pub use linked::{decode_file, decode_file_with};
pub use stride::StrideDecoder;
