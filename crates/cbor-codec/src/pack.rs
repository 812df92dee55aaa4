//! A compact format-string interpreter over the primitive layer (§4.8).
//! Each character in the format string consumes one [`PackValue`] on
//! write, or produces one [`PackValue`] on read. New directives can be
//! added to the `match` arms below; keep the three already defined.

use byteio::{ByteReader, ByteWriter};

use crate::error::{CborError, CborResult};
use crate::primitive::{read_bool, read_int64, read_uint64, write_bool, write_int64, write_uint64};

/// One variadic argument to [`pack`] or one decoded slot from [`unpack`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PackValue {
    /// `q` — a signed 64-bit integer.
    Int(i64),
    /// `Q` — an unsigned 64-bit integer.
    UInt(u64),
    /// `?` — a boolean.
    Bool(bool),
}

/// Write `values` according to `fmt`. [`CborError::Fmt`] if `fmt` and
/// `values` differ in length, contain an unrecognized directive, or a
/// directive doesn't match the value's variant.
pub fn pack(w: &mut ByteWriter<'_>, fmt: &str, values: &[PackValue]) -> CborResult<()> {
    if fmt.chars().count() != values.len() {
        return Err(CborError::Fmt);
    }
    for (directive, value) in fmt.chars().zip(values) {
        match (directive, value) {
            ('q', PackValue::Int(n)) => write_int64(w, *n)?,
            ('Q', PackValue::UInt(n)) => write_uint64(w, *n)?,
            ('?', PackValue::Bool(b)) => write_bool(w, *b)?,
            _ => return Err(CborError::Fmt),
        }
    }
    Ok(())
}

/// Read values according to `fmt` into `out`, one [`PackValue`] per
/// directive. `out`'s existing contents are overwritten regardless of
/// variant. The first read error encountered — from a malformed head, a
/// type mismatch, or an out-of-range value — is returned immediately;
/// directives after it are not attempted.
pub fn unpack(r: &mut ByteReader<'_>, fmt: &str, out: &mut [PackValue]) -> CborResult<()> {
    if fmt.chars().count() != out.len() {
        return Err(CborError::Fmt);
    }
    for (directive, slot) in fmt.chars().zip(out.iter_mut()) {
        *slot = match directive {
            'q' => PackValue::Int(read_int64(r)?),
            'Q' => PackValue::UInt(read_uint64(r)?),
            '?' => PackValue::Bool(read_bool(r)?),
            _ => return Err(CborError::Fmt),
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrip() {
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        let values = [PackValue::Int(-7), PackValue::UInt(300), PackValue::Bool(true)];
        pack(&mut w, "qQ?", &values).unwrap();

        let mut r = ByteReader::new(w.as_slice());
        let mut out = [PackValue::Bool(false); 3];
        unpack(&mut r, "qQ?", &mut out).unwrap();
        assert_eq!(out, values);
    }

    #[test]
    fn mismatched_directive_and_value_is_fmt_error() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        let values = [PackValue::Bool(true)];
        assert_eq!(pack(&mut w, "q", &values), Err(CborError::Fmt));
    }

    #[test]
    fn unrecognized_directive_is_fmt_error() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        let values = [PackValue::Int(1)];
        assert_eq!(pack(&mut w, "z", &values), Err(CborError::Fmt));
    }

    #[test]
    fn length_mismatch_is_fmt_error() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        assert_eq!(pack(&mut w, "qq", &[PackValue::Int(1)]), Err(CborError::Fmt));
    }

    #[test]
    fn unpack_propagates_first_read_error() {
        // Encodes a single negative integer; format asks for two values.
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_int64(&mut w, -1).unwrap();
        let mut r = ByteReader::new(w.as_slice());
        let mut out = [PackValue::Bool(false); 2];
        assert_eq!(unpack(&mut r, "qq", &mut out), Err(CborError::EndOfStream));
    }
}
