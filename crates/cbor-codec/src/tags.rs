//! Standard tagged constructs built on top of the generic tag head
//! (§4.7): date-time, self-describe, encoded-CBOR, decimal fraction and
//! rational. Each pairs a tag number with a fixed body shape; readers
//! validate both.

use byteio::{ByteReader, ByteWriter};

use crate::composite::skip_value;
use crate::error::{CborError, CborResult};
use crate::primitive::{read_float64, read_int64, read_tag, read_text, read_uint64, write_float64, write_int64, write_tag, write_text, Length};
use crate::Limits;

/// Tag 0: RFC 3339 date/time string.
pub const TAG_DATETIME_TEXT: u64 = 0;
/// Tag 1: numeric (integer or float) seconds since the Unix epoch.
pub const TAG_DATETIME_EPOCH: u64 = 1;
/// Tag 4: decimal fraction, `[exponent, mantissa]`.
pub const TAG_DECIMAL_FRACTION: u64 = 4;
/// Tag 24: a byte string whose content is itself encoded CBOR.
pub const TAG_ENCODED_CBOR: u64 = 24;
/// Tag 30: rational number, `[numerator, denominator]`.
pub const TAG_RATIONAL: u64 = 30;
/// Tag 55799: the "self-describe CBOR" marker.
pub const TAG_SELF_DESCRIBE: u64 = 55799;

/// A decoded date-time: either the raw RFC 3339 text (left to the caller
/// to parse) or seconds since the epoch, normalized to `f64` regardless
/// of whether the wire form was an integer or a float.
///
/// Per the ambiguity noted against the source this codec was distilled
/// from — numeric date-time input could plausibly emit either tag 0 or
/// tag 1 — this codec always writes numeric input under tag 1 (epoch),
/// reserving tag 0 strictly for textual input; see `DESIGN.md`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateTime<'a> {
    /// Tag 0 body: an RFC 3339 string, unparsed.
    Text(&'a str),
    /// Tag 1 body: seconds since the Unix epoch.
    Epoch(f64),
}

/// Write an RFC 3339 date-time string under tag 0.
pub fn write_datetime_text(w: &mut ByteWriter<'_>, text: &str) -> CborResult<()> {
    write_tag(w, TAG_DATETIME_TEXT)?;
    write_text(w, text)
}

/// Write seconds-since-epoch under tag 1. Written as an integer when
/// `seconds` is a whole number exactly representable in `i64` (matching
/// canonical CBOR's preference for the narrowest exact form), otherwise
/// as a canonically-narrowed float.
pub fn write_datetime_epoch(w: &mut ByteWriter<'_>, seconds: f64) -> CborResult<()> {
    write_tag(w, TAG_DATETIME_EPOCH)?;
    if seconds.fract() == 0.0 && seconds >= i64::MIN as f64 && seconds <= i64::MAX as f64 {
        write_int64(w, seconds as i64)
    } else {
        write_float64(w, seconds)
    }
}

/// Read a date-time tag (0 or 1). [`CborError::BadDatetime`] for any
/// other tag number or a malformed body.
pub fn read_datetime<'a>(r: &mut ByteReader<'a>) -> CborResult<DateTime<'a>> {
    let tag = read_tag(r)?;
    match tag {
        TAG_DATETIME_TEXT => {
            let text = read_text(r).map_err(|_| CborError::BadDatetime)?;
            Ok(DateTime::Text(text))
        }
        TAG_DATETIME_EPOCH => {
            let first = r.peek_u8().map_err(|_| CborError::BadDatetime)?;
            let major = first >> 5;
            let seconds = match major {
                0 | 1 => read_int64(r).map_err(|_| CborError::BadDatetime)? as f64,
                7 => read_float64(r).map_err(|_| CborError::BadDatetime)?,
                _ => return Err(CborError::BadDatetime),
            };
            Ok(DateTime::Epoch(seconds))
        }
        _ => Err(CborError::BadDatetime),
    }
}

/// Write the self-describe marker (tag 55799). The wrapped item is
/// written directly afterward by the caller.
pub fn write_self_describe_start(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_tag(w, TAG_SELF_DESCRIBE)
}

/// Read the self-describe marker and hand back a sub-stream scoped to the
/// item it wraps, without decoding that item's contents. `limits` bounds
/// recursion while locating the item's end.
pub fn read_self_describe<'a>(r: &mut ByteReader<'a>, limits: &Limits) -> CborResult<&'a [u8]> {
    let tag = read_tag(r)?;
    if tag != TAG_SELF_DESCRIBE {
        return Err(CborError::BadType);
    }
    let before = r.remaining();
    let start_cursor = r.cursor();
    skip_value(r, limits)?;
    let consumed = r.cursor() - start_cursor;
    Ok(&before[..consumed])
}

/// Write tag 24 wrapping `inner`, an already-encoded CBOR byte string.
pub fn write_encoded_cbor(w: &mut ByteWriter<'_>, inner: &[u8]) -> CborResult<()> {
    write_tag(w, TAG_ENCODED_CBOR)?;
    crate::primitive::write_bytes(w, inner)
}

/// Read tag 24, returning the inner byte string unparsed (the caller
/// decodes it with a fresh reader if and when it needs to).
pub fn read_encoded_cbor<'a>(r: &mut ByteReader<'a>) -> CborResult<&'a [u8]> {
    let tag = read_tag(r)?;
    if tag != TAG_ENCODED_CBOR {
        return Err(CborError::BadEncoded);
    }
    crate::primitive::read_bytes(r).map_err(|_| CborError::BadEncoded)
}

/// Write tag 4 wrapping `[exponent, mantissa]`.
pub fn write_decimal_fraction(w: &mut ByteWriter<'_>, exponent: i64, mantissa: i64) -> CborResult<()> {
    write_tag(w, TAG_DECIMAL_FRACTION)?;
    crate::primitive::write_array_header(w, 2)?;
    write_int64(w, exponent)?;
    write_int64(w, mantissa)
}

/// Read tag 4, returning `(exponent, mantissa)`.
/// [`CborError::BadDecimal`] if the tag, array shape or element types
/// don't match.
pub fn read_decimal_fraction(r: &mut ByteReader<'_>) -> CborResult<(i64, i64)> {
    let tag = read_tag(r)?;
    if tag != TAG_DECIMAL_FRACTION {
        return Err(CborError::BadDecimal);
    }
    let len = crate::primitive::read_array_header(r).map_err(|_| CborError::BadDecimal)?;
    if len != Length::Definite(2) {
        return Err(CborError::BadDecimal);
    }
    let exponent = read_int64(r).map_err(|_| CborError::BadDecimal)?;
    let mantissa = read_int64(r).map_err(|_| CborError::BadDecimal)?;
    Ok((exponent, mantissa))
}

/// Write tag 30 wrapping `[numerator, denominator]`.
pub fn write_rational(w: &mut ByteWriter<'_>, numerator: i64, denominator: u64) -> CborResult<()> {
    write_tag(w, TAG_RATIONAL)?;
    crate::primitive::write_array_header(w, 2)?;
    write_int64(w, numerator)?;
    crate::primitive::write_uint64(w, denominator)
}

/// Read tag 30, returning `(numerator, denominator)`.
/// [`CborError::BadRational`] if the tag, array shape or element types
/// don't match.
pub fn read_rational(r: &mut ByteReader<'_>) -> CborResult<(i64, u64)> {
    let tag = read_tag(r)?;
    if tag != TAG_RATIONAL {
        return Err(CborError::BadRational);
    }
    let len = crate::primitive::read_array_header(r).map_err(|_| CborError::BadRational)?;
    if len != Length::Definite(2) {
        return Err(CborError::BadRational);
    }
    let numerator = read_int64(r).map_err(|_| CborError::BadRational)?;
    let denominator = read_uint64(r).map_err(|_| CborError::BadRational)?;
    Ok((numerator, denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_text_roundtrip() {
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        write_datetime_text(&mut w, "2013-03-21T20:04:00Z").unwrap();
        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(read_datetime(&mut r).unwrap(), DateTime::Text("2013-03-21T20:04:00Z"));
    }

    #[test]
    fn datetime_epoch_prefers_integer_form() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_datetime_epoch(&mut w, 1_363_896_240.0).unwrap();
        // tag(1) + major-0 integer, not a float head.
        assert_eq!(w.as_slice()[0], 0xC1);
        let major = w.as_slice()[1] >> 5;
        assert_eq!(major, 0);

        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(read_datetime(&mut r).unwrap(), DateTime::Epoch(1_363_896_240.0));
    }

    #[test]
    fn datetime_epoch_fractional_uses_float() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_datetime_epoch(&mut w, 1_363_896_240.5).unwrap();
        let major = w.as_slice()[1] >> 5;
        assert_eq!(major, 7);

        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(read_datetime(&mut r).unwrap(), DateTime::Epoch(1_363_896_240.5));
    }

    #[test]
    fn self_describe_scopes_wrapped_item() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_self_describe_start(&mut w).unwrap();
        crate::primitive::write_uint64(&mut w, 42).unwrap();

        let limits = Limits::default();
        let mut r = ByteReader::new(w.as_slice());
        let wrapped = read_self_describe(&mut r, &limits).unwrap();
        assert_eq!(wrapped, &[0x18, 42]);
        assert_eq!(r.read_avail(), 0);
    }

    #[test]
    fn encoded_cbor_roundtrip() {
        let mut inner_buf = [0u8; 8];
        let mut inner_w = ByteWriter::new(&mut inner_buf);
        crate::primitive::write_uint64(&mut inner_w, 7).unwrap();

        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_encoded_cbor(&mut w, inner_w.as_slice()).unwrap();

        let mut r = ByteReader::new(w.as_slice());
        let inner = read_encoded_cbor(&mut r).unwrap();
        let mut inner_r = ByteReader::new(inner);
        assert_eq!(read_uint64(&mut inner_r).unwrap(), 7);
    }

    #[test]
    fn decimal_fraction_roundtrip() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_decimal_fraction(&mut w, -2, 27315).unwrap(); // 273.15
        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(read_decimal_fraction(&mut r).unwrap(), (-2, 27315));
    }

    #[test]
    fn rational_roundtrip() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_rational(&mut w, 1, 3).unwrap();
        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(read_rational(&mut r).unwrap(), (1, 3));
    }

    #[test]
    fn wrong_tag_number_rejected() {
        let mut buf = [0u8; 8];
        let mut w = ByteWriter::new(&mut buf);
        write_tag(&mut w, 998).unwrap();
        crate::primitive::write_text(&mut w, "this").unwrap();
        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(read_datetime(&mut r), Err(CborError::BadDatetime));
    }
}
