//! byteio — no-alloc byte-stream primitives (no_std-ready)
//!
//! Provides:
//! - [`ByteWriter`] / [`ByteReader`]: a non-owning write/read view over a
//!   caller-supplied buffer, with no hidden state and no dynamic
//!   allocation.
//! - [`crc32c`]: table-driven CRC-32C (Castagnoli), matching the
//!   `CRC32C_INIT` / residue-check conventions of the C reference this is
//!   grounded on.
//! - [`pcg32`]: the PCG-XSH-RR-64/32 deterministic PRNG with a
//!   bias-free bounded sampler.
//! - [`cobs`]: consistent-overhead byte stuffing (zero-run elimination)
//!   for framing records behind a `0x00` delimiter.
//!
//! Features:
//! - `std` (default): adds `std::error::Error` impls.
//! - `serde`: derives (de)serialization on [`Error`] and [`pcg32::Pcg32`].

#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

/// Byte-stuffing framing (zero-run elimination).
pub mod cobs;
/// Table-driven CRC-32C.
pub mod crc32c;
/// Shared low-level error type.
pub mod error;
/// PCG32 pseudo-random generator.
pub mod pcg32;
/// Byte-stream reader/writer views.
pub mod stream;

pub use error::Error;
pub use pcg32::Pcg32;
pub use stream::{ByteReader, ByteWriter};

/// Convenient re-export of the crate's public surface.
pub mod prelude {
    pub use crate::{cobs, crc32c, pcg32::Pcg32, ByteReader, ByteWriter, Error};
}
