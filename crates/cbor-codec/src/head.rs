//! The CBOR "head": one initial byte (major type + additional info) plus
//! zero or more big-endian argument bytes.

use byteio::{ByteReader, ByteWriter};

use crate::error::{CborError, CborResult};

/// Major type 0: unsigned integer.
pub const MAJOR_UINT: u8 = 0;
/// Major type 1: negative integer (argument encodes `-1-n`).
pub const MAJOR_NINT: u8 = 1;
/// Major type 2: byte string.
pub const MAJOR_BYTES: u8 = 2;
/// Major type 3: text string.
pub const MAJOR_TEXT: u8 = 3;
/// Major type 4: array.
pub const MAJOR_ARRAY: u8 = 4;
/// Major type 5: map.
pub const MAJOR_MAP: u8 = 5;
/// Major type 6: tag.
pub const MAJOR_TAG: u8 = 6;
/// Major type 7: simple value / float / break.
pub const MAJOR_SIMPLE: u8 = 7;

/// Additional-info value meaning "indefinite length" (majors 2,3,4,5) or
/// "break" (major 7).
pub const AI_INDEFINITE: u8 = 31;
/// The break byte itself (major 7, ai 31).
pub const BREAK: u8 = 0xFF;

/// Write the minimal-length head for `(major, arg)`. Never emits an
/// indefinite-length head; see [`write_indefinite_head`] for that.
pub fn write_head(w: &mut ByteWriter<'_>, major: u8, arg: u64) -> CborResult<()> {
    let top = major << 5;
    if arg < 24 {
        w.write_u8(top | arg as u8)?;
    } else if arg <= u64::from(u8::MAX) {
        w.write_u8(top | 24)?;
        w.write_u8(arg as u8)?;
    } else if arg <= u64::from(u16::MAX) {
        w.write_u8(top | 25)?;
        w.write_u16_be(arg as u16)?;
    } else if arg <= u64::from(u32::MAX) {
        w.write_u8(top | 26)?;
        w.write_u32_be(arg as u32)?;
    } else {
        w.write_u8(top | 27)?;
        w.write_u64_be(arg)?;
    }
    Ok(())
}

/// Open an indefinite-length item of the given major type (2, 3, 4 or 5).
pub fn write_indefinite_head(w: &mut ByteWriter<'_>, major: u8) -> CborResult<()> {
    w.write_u8((major << 5) | AI_INDEFINITE)?;
    Ok(())
}

/// Write the break byte, closing the innermost open indefinite-length
/// item.
pub fn write_break(w: &mut ByteWriter<'_>) -> CborResult<()> {
    w.write_u8(BREAK)?;
    Ok(())
}

/// A decoded head: major type, argument (meaningless when `indefinite`),
/// and whether additional info was 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    /// Major type (top 3 bits of the initial byte).
    pub major: u8,
    /// Decoded argument value. Undefined when `indefinite` is true.
    pub arg: u64,
    /// True if additional info was 31 (indefinite-length open, or break
    /// when `major == MAJOR_SIMPLE`).
    pub indefinite: bool,
    /// The raw additional-information field (0..=31) the head was read
    /// with. Needed by callers that must distinguish encoding forms Head's
    /// other fields collapse together — e.g. a simple value of 5 encoded
    /// directly (`ai == 5`) versus via the one-byte extension (`ai == 24`,
    /// `arg == 5`), which RFC 8949 treats differently.
    pub ai: u8,
}

/// Decode one head. `ai` 28, 29 and 30 always produce [`CborError::InvalidAi`].
/// Callers that don't accept an indefinite-length argument for the
/// decoded major type must check `indefinite` themselves.
pub fn read_head(r: &mut ByteReader<'_>) -> CborResult<Head> {
    let initial = r.read_u8()?;
    let major = initial >> 5;
    let ai = initial & 0x1F;
    let head = match ai {
        0..=23 => Head { major, arg: u64::from(ai), indefinite: false, ai },
        24 => Head { major, arg: u64::from(r.read_u8()?), indefinite: false, ai },
        25 => Head { major, arg: u64::from(r.read_u16_be()?), indefinite: false, ai },
        26 => Head { major, arg: u64::from(r.read_u32_be()?), indefinite: false, ai },
        27 => Head { major, arg: r.read_u64_be()?, indefinite: false, ai },
        28..=30 => return Err(CborError::InvalidAi),
        31 => Head { major, arg: 0, indefinite: true, ai },
        _ => unreachable!("ai is masked to 5 bits"),
    };
    #[cfg(feature = "tracing")]
    tracing::trace!(major = head.major, arg = head.arg, indefinite = head.indefinite, "cbor head");
    Ok(head)
}
