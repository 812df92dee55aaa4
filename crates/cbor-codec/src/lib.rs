//! cbor-codec — streaming, no-alloc CBOR (RFC 8949) reader/writer
//!
//! Every operation works over a caller-supplied buffer via
//! [`byteio::ByteReader`] / [`byteio::ByteWriter`]: there is no owned
//! object model, no dynamic allocation, and no I/O. Modules, roughly
//! bottom-up:
//!
//! - [`head`]: the one-byte-plus-argument "head" shared by every item.
//! - [`float16`]: half/single/double bit-level conversion for canonical
//!   float narrowing.
//! - [`primitive`]: definite-length integers, strings, array/map/tag
//!   heads, simple values and floats.
//! - [`composite`]: indefinite-length chunking, break handling, and a
//!   recursion-bounded generic value skipper.
//! - [`tags`]: date-time, self-describe, encoded-CBOR, decimal fraction
//!   and rational.
//! - [`pack`]: a compact format-string interpreter over the primitive
//!   layer.
//!
//! Features:
//! - `std` (default): adds `std::error::Error` impls.
//! - `tracing` (default): structured traces at head decode/encode and
//!   failure boundaries; compiles to nothing when disabled.
//! - `serde`: derives (de)serialization on [`error::CborError`] and
//!   [`Limits`].

#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

/// Indefinite-length chunking, break handling, recursion-bounded skip.
pub mod composite;
/// Error type shared by every fallible operation in this crate.
pub mod error;
/// Half/single/double float bit-level conversion.
pub mod float16;
/// The CBOR "head": major type, additional info, argument bytes.
pub mod head;
/// The `pack`/`unpack` format-string interpreter.
pub mod pack;
/// Leaf-level readers and writers: integers, strings, headers, simples, floats.
pub mod primitive;
/// Standard tagged constructs (date-time, self-describe, encoded-CBOR,
/// decimal fraction, rational).
pub mod tags;

pub use error::CborError;

/// Configuration threaded through recursive decode operations.
///
/// The only limit this codec enforces on its own: every other constraint
/// (buffer sizes, string lengths) is implicit in the caller-supplied
/// buffers themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum nesting depth for arrays, maps and tags that
    /// [`composite::skip_value`] and the tag helpers will descend into
    /// before returning [`CborError::Recursion`].
    pub max_depth: u8,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: 16 }
    }
}

/// Convenient re-export of the crate's public surface.
pub mod prelude {
    pub use crate::composite::{self, skip_value};
    pub use crate::error::{CborError, CborResult};
    pub use crate::float16;
    pub use crate::head::{self, Head};
    pub use crate::pack::{self, pack, unpack, PackValue};
    pub use crate::primitive;
    pub use crate::tags;
    pub use crate::Limits;
}
