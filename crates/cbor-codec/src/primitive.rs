//! Readers and writers for CBOR's leaf-level primitives: integers, byte
//! and text strings (definite-length only — see [`crate::composite`] for
//! indefinite-length chunking), array/map/tag heads, simple values and
//! floats. These sit directly on top of [`crate::head`].

use byteio::{ByteReader, ByteWriter};

use crate::error::{CborError, CborResult};
use crate::float16;
use crate::head::{self, read_head, write_head, Head, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NINT, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UINT};

/// Write an unsigned 64-bit integer (major type 0).
pub fn write_uint64(w: &mut ByteWriter<'_>, value: u64) -> CborResult<()> {
    write_head(w, MAJOR_UINT, value)
}

/// Read an unsigned 64-bit integer. Errors with [`CborError::BadType`] if
/// the head is not major type 0.
pub fn read_uint64(r: &mut ByteReader<'_>) -> CborResult<u64> {
    let head = read_head(r)?;
    if head.major != MAJOR_UINT {
        return Err(CborError::BadType);
    }
    Ok(head.arg)
}

/// Write a signed 64-bit integer, choosing major type 0 or 1.
pub fn write_int64(w: &mut ByteWriter<'_>, value: i64) -> CborResult<()> {
    if value >= 0 {
        write_head(w, MAJOR_UINT, value as u64)
    } else {
        // CBOR negative integers encode `-1-n`; bitwise NOT computes this
        // without overflow for every i64, including i64::MIN.
        write_head(w, MAJOR_NINT, !value as u64)
    }
}

/// Read a signed 64-bit integer from either major type 0 or 1.
/// [`CborError::Range`] if the encoded magnitude doesn't fit `i64`.
pub fn read_int64(r: &mut ByteReader<'_>) -> CborResult<i64> {
    let head = read_head(r)?;
    match head.major {
        MAJOR_UINT => i64::try_from(head.arg).map_err(|_| CborError::Range),
        MAJOR_NINT => {
            if head.arg > i64::MAX as u64 {
                Err(CborError::Range)
            } else {
                Ok(!(head.arg as i64))
            }
        }
        _ => Err(CborError::BadType),
    }
}

macro_rules! narrow_uint_reader {
    ($name:ident, $ty:ty) => {
        /// Read an unsigned integer, rejecting values that don't fit this width.
        pub fn $name(r: &mut ByteReader<'_>) -> CborResult<$ty> {
            <$ty>::try_from(read_uint64(r)?).map_err(|_| CborError::Range)
        }
    };
}

macro_rules! narrow_int_reader {
    ($name:ident, $ty:ty) => {
        /// Read a signed integer, rejecting values that don't fit this width.
        pub fn $name(r: &mut ByteReader<'_>) -> CborResult<$ty> {
            <$ty>::try_from(read_int64(r)?).map_err(|_| CborError::Range)
        }
    };
}

narrow_uint_reader!(read_uint8, u8);
narrow_uint_reader!(read_uint16, u16);
narrow_uint_reader!(read_uint32, u32);
narrow_int_reader!(read_int8, i8);
narrow_int_reader!(read_int16, i16);
narrow_int_reader!(read_int32, i32);

/// Write a definite-length byte string.
pub fn write_bytes(w: &mut ByteWriter<'_>, data: &[u8]) -> CborResult<()> {
    write_head(w, MAJOR_BYTES, data.len() as u64)?;
    w.write_bytes(data)?;
    Ok(())
}

/// Read a definite-length byte string as a sub-stream slice aliasing the
/// parent buffer. [`CborError::BadType`] on indefinite-length or a
/// non-byte-string head.
pub fn read_bytes<'a>(r: &mut ByteReader<'a>) -> CborResult<&'a [u8]> {
    let head = read_head(r)?;
    if head.major != MAJOR_BYTES || head.indefinite {
        return Err(CborError::BadType);
    }
    let len = usize::try_from(head.arg).map_err(|_| CborError::ItemTooLong)?;
    Ok(r.read_bytes(len)?)
}

/// Write a definite-length UTF-8 text string.
pub fn write_text(w: &mut ByteWriter<'_>, s: &str) -> CborResult<()> {
    write_head(w, MAJOR_TEXT, s.len() as u64)?;
    w.write_bytes(s.as_bytes())?;
    Ok(())
}

/// Read a definite-length text string as a sub-stream slice, validating
/// UTF-8. [`CborError::InvalidUtf8`] on malformed content.
pub fn read_text<'a>(r: &mut ByteReader<'a>) -> CborResult<&'a str> {
    let head = read_head(r)?;
    if head.major != MAJOR_TEXT || head.indefinite {
        return Err(CborError::BadType);
    }
    let len = usize::try_from(head.arg).map_err(|_| CborError::ItemTooLong)?;
    let bytes = r.read_bytes(len)?;
    core::str::from_utf8(bytes).map_err(|_| {
        #[cfg(feature = "tracing")]
        tracing::warn!("invalid utf-8 in text string");
        CborError::InvalidUtf8
    })
}

/// The length of an array, map or string head: either definite or opened
/// with the indefinite-length marker (closed later by a break byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// A known item/pair/byte count.
    Definite(u64),
    /// Opened indefinite-length; a break byte terminates it.
    Indefinite,
}

fn head_length(head: Head) -> Length {
    if head.indefinite {
        Length::Indefinite
    } else {
        Length::Definite(head.arg)
    }
}

/// Write a definite-length array head. Caller writes `len` items after.
pub fn write_array_header(w: &mut ByteWriter<'_>, len: u64) -> CborResult<()> {
    write_head(w, MAJOR_ARRAY, len)
}

/// Read an array head. [`CborError::BadType`] if the major type isn't 4.
pub fn read_array_header(r: &mut ByteReader<'_>) -> CborResult<Length> {
    let head = read_head(r)?;
    if head.major != MAJOR_ARRAY {
        return Err(CborError::BadType);
    }
    Ok(head_length(head))
}

/// Write a definite-length map head. Caller writes `len` key/value pairs
/// after (`2 * len` items).
pub fn write_map_header(w: &mut ByteWriter<'_>, len: u64) -> CborResult<()> {
    write_head(w, MAJOR_MAP, len)
}

/// Read a map head. [`CborError::BadType`] if the major type isn't 5.
pub fn read_map_header(r: &mut ByteReader<'_>) -> CborResult<Length> {
    let head = read_head(r)?;
    if head.major != MAJOR_MAP {
        return Err(CborError::BadType);
    }
    Ok(head_length(head))
}

/// Write a tag head. The tagged item itself is written separately.
pub fn write_tag(w: &mut ByteWriter<'_>, tag: u64) -> CborResult<()> {
    write_head(w, MAJOR_TAG, tag)
}

/// Read a tag head, returning the tag number.
pub fn read_tag(r: &mut ByteReader<'_>) -> CborResult<u64> {
    let head = read_head(r)?;
    if head.major != MAJOR_TAG || head.indefinite {
        return Err(CborError::BadType);
    }
    Ok(head.arg)
}

const SIMPLE_FALSE: u64 = 20;
const SIMPLE_TRUE: u64 = 21;
const SIMPLE_NULL: u64 = 22;
const SIMPLE_UNDEFINED: u64 = 23;

/// Write a boolean as simple value `false`/`true`.
pub fn write_bool(w: &mut ByteWriter<'_>, value: bool) -> CborResult<()> {
    write_head(w, MAJOR_SIMPLE, if value { SIMPLE_TRUE } else { SIMPLE_FALSE })
}

/// Read a boolean. [`CborError::BadType`] for any other simple value.
pub fn read_bool(r: &mut ByteReader<'_>) -> CborResult<bool> {
    let head = read_head(r)?;
    if head.major != MAJOR_SIMPLE {
        return Err(CborError::BadType);
    }
    match head.arg {
        SIMPLE_FALSE => Ok(false),
        SIMPLE_TRUE => Ok(true),
        _ => Err(CborError::BadType),
    }
}

/// Write the `null` simple value.
pub fn write_null(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_head(w, MAJOR_SIMPLE, SIMPLE_NULL)
}

/// Read `null`. [`CborError::Null`] for anything else, matching the
/// "missing required argument" sense callers use this for.
pub fn read_null(r: &mut ByteReader<'_>) -> CborResult<()> {
    let head = read_head(r)?;
    if head.major == MAJOR_SIMPLE && head.arg == SIMPLE_NULL {
        Ok(())
    } else {
        Err(CborError::Null)
    }
}

/// Write the `undefined` simple value.
pub fn write_undefined(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_head(w, MAJOR_SIMPLE, SIMPLE_UNDEFINED)
}

/// Read `undefined`. [`CborError::BadType`] for anything else.
pub fn read_undefined(r: &mut ByteReader<'_>) -> CborResult<()> {
    let head = read_head(r)?;
    if head.major == MAJOR_SIMPLE && head.arg == SIMPLE_UNDEFINED {
        Ok(())
    } else {
        Err(CborError::BadType)
    }
}

/// Write an arbitrary simple value outside the `false`/`true`/`null`/
/// `undefined` range (`0..=19` or `32..=255`). `20..=31` are reserved —
/// `20..=23` have dedicated writers, `24..=31` have no meaning.
pub fn write_simple(w: &mut ByteWriter<'_>, value: u8) -> CborResult<()> {
    match value {
        0..=19 => write_head(w, MAJOR_SIMPLE, u64::from(value)),
        32..=255 => {
            w.write_u8((MAJOR_SIMPLE << 5) | 24)?;
            w.write_u8(value)?;
            Ok(())
        }
        _ => Err(CborError::BadSimpleValue),
    }
}

/// Read a simple value. Rejects the redundant one-byte-extension encoding
/// of values below 32 (RFC 8949 §3.3 forbids it) and any float head.
pub fn read_simple(r: &mut ByteReader<'_>) -> CborResult<u8> {
    let head = read_head(r)?;
    if head.major != MAJOR_SIMPLE || head.indefinite {
        return Err(CborError::BadType);
    }
    match head.ai {
        0..=23 => Ok(head.arg as u8),
        24 if head.arg >= 32 => Ok(head.arg as u8),
        24 => Err(CborError::BadSimpleValue),
        _ => Err(CborError::BadType),
    }
}

fn write_f16_bits(w: &mut ByteWriter<'_>, bits: u16) -> CborResult<()> {
    w.write_u8((MAJOR_SIMPLE << 5) | 25)?;
    w.write_u16_be(bits)?;
    Ok(())
}

fn write_f32_bits(w: &mut ByteWriter<'_>, bits: u32) -> CborResult<()> {
    w.write_u8((MAJOR_SIMPLE << 5) | 26)?;
    w.write_u32_be(bits)?;
    Ok(())
}

fn write_f64_bits(w: &mut ByteWriter<'_>, bits: u64) -> CborResult<()> {
    w.write_u8((MAJOR_SIMPLE << 5) | 27)?;
    w.write_u64_be(bits)?;
    Ok(())
}

/// Write a float, canonically narrowed to the smallest width that
/// round-trips bit-exactly: half, then single, then double. NaN is always
/// written as the canonical quiet half NaN; zero and infinities always fit
/// in half.
pub fn write_float64(w: &mut ByteWriter<'_>, value: f64) -> CborResult<()> {
    if value.is_nan() {
        return write_f16_bits(w, float16::CANONICAL_NAN);
    }
    if value == 0.0 {
        let bits16: u16 = if value.is_sign_negative() { 0x8000 } else { 0x0000 };
        return write_f16_bits(w, bits16);
    }
    if value.is_infinite() {
        let bits16: u16 = if value.is_sign_negative() { 0xFC00 } else { 0x7C00 };
        return write_f16_bits(w, bits16);
    }
    if let Some(bits16) = float16::f64_to_f16_exact(value) {
        return write_f16_bits(w, bits16);
    }
    let as_f32 = value as f32;
    if f64::from(as_f32) == value {
        return write_f32_bits(w, as_f32.to_bits());
    }
    write_f64_bits(w, value.to_bits())
}

/// Read a float of any canonical or non-canonical width, widening to
/// `f64`. [`CborError::BadType`] for a non-float major-7 head.
pub fn read_float64(r: &mut ByteReader<'_>) -> CborResult<f64> {
    let head = read_head(r)?;
    if head.major != MAJOR_SIMPLE {
        return Err(CborError::BadType);
    }
    match head.ai {
        25 => Ok(float16::f16_to_f64(head.arg as u16)),
        26 => Ok(f64::from(f32::from_bits(head.arg as u32))),
        27 => Ok(f64::from_bits(head.arg)),
        _ => Err(CborError::BadType),
    }
}

/// Read a float, narrowing it to `f32`. [`CborError::Range`] if the
/// stored value is finite but overflows `f32`'s range (e.g. a `f64` head
/// whose magnitude exceeds [`f32::MAX`]); precision loss from narrowing
/// is otherwise accepted, matching [`read_float64`]'s widening behavior.
pub fn read_float32(r: &mut ByteReader<'_>) -> CborResult<f32> {
    let value = read_float64(r)?;
    let narrowed = value as f32;
    if narrowed.is_infinite() && value.is_finite() {
        return Err(CborError::Range);
    }
    Ok(narrowed)
}

/// Read the break byte (major 7, ai 31) that closes an indefinite-length
/// container or chunked string. [`CborError::UnexpectedBreak`] — named
/// for the caller's perspective, since a bare read here only happens when
/// one was expected — if the head doesn't match.
pub fn read_break(r: &mut ByteReader<'_>) -> CborResult<()> {
    let head = read_head(r)?;
    if head.major == MAJOR_SIMPLE && head.indefinite {
        Ok(())
    } else {
        Err(CborError::UnexpectedBreak)
    }
}

/// Peek whether the next byte is a break, without consuming anything
/// else. Used by indefinite-length loops to decide "one more chunk" vs.
/// "done".
pub fn peek_is_break(r: &ByteReader<'_>) -> bool {
    r.peek_u8() == Ok(head::BREAK)
}
