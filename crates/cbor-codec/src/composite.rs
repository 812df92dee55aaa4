//! Indefinite-length strings and containers: chunk concatenation into a
//! caller-supplied buffer, break handling, and a recursion-bounded
//! generic value skipper used to validate or step over an item whose
//! shape the caller doesn't care about.

use byteio::{ByteReader, ByteWriter};

use crate::error::{CborError, CborResult};
use crate::head::{self, read_head, write_indefinite_head, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP, MAJOR_NINT, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UINT};
use crate::primitive::{peek_is_break, read_break};
use crate::Limits;

/// Open an indefinite-length byte string. Chunks follow, each written
/// with [`crate::primitive::write_bytes`]; close with [`head::write_break`].
pub fn write_bytes_indefinite_start(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_indefinite_head(w, MAJOR_BYTES)
}

/// Open an indefinite-length text string. Chunks follow, each written
/// with [`crate::primitive::write_text`]; close with [`head::write_break`].
pub fn write_text_indefinite_start(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_indefinite_head(w, MAJOR_TEXT)
}

/// Open an indefinite-length array. Items follow directly; close with
/// [`head::write_break`].
pub fn write_array_indefinite_start(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_indefinite_head(w, MAJOR_ARRAY)
}

/// Open an indefinite-length map. Key/value pairs follow directly; close
/// with [`head::write_break`].
pub fn write_map_indefinite_start(w: &mut ByteWriter<'_>) -> CborResult<()> {
    write_indefinite_head(w, MAJOR_MAP)
}

/// Read a byte string, definite or indefinite, concatenating chunks into
/// `out`. Returns the number of bytes written. Each indefinite chunk must
/// be a definite-length byte string ([`CborError::IndefMismatch`] if a
/// chunk has a different major type, [`CborError::IndefNesting`] if a
/// chunk is itself indefinite-length).
pub fn read_bytes_into(r: &mut ByteReader<'_>, out: &mut [u8]) -> CborResult<usize> {
    let head = read_head(r)?;
    if head.major != MAJOR_BYTES {
        return Err(CborError::BadType);
    }
    if !head.indefinite {
        let len = usize::try_from(head.arg).map_err(|_| CborError::ItemTooLong)?;
        let chunk = r.read_bytes(len)?;
        copy_into(out, 0, chunk)?;
        return Ok(len);
    }
    let mut written = 0usize;
    loop {
        if peek_is_break(r) {
            read_break(r)?;
            return Ok(written);
        }
        let chunk_head = read_head(r)?;
        if chunk_head.major != MAJOR_BYTES {
            return Err(CborError::IndefMismatch);
        }
        if chunk_head.indefinite {
            return Err(CborError::IndefNesting);
        }
        let len = usize::try_from(chunk_head.arg).map_err(|_| CborError::ItemTooLong)?;
        let chunk = r.read_bytes(len)?;
        copy_into(out, written, chunk)?;
        written += len;
    }
}

/// Read a text string, definite or indefinite, concatenating chunks into
/// `out` and validating the assembled bytes as UTF-8. Same chunk-shape
/// errors as [`read_bytes_into`].
pub fn read_text_into<'a>(r: &mut ByteReader<'_>, out: &'a mut [u8]) -> CborResult<&'a str> {
    let head = read_head(r)?;
    if head.major != MAJOR_TEXT {
        return Err(CborError::BadType);
    }
    let written = if !head.indefinite {
        let len = usize::try_from(head.arg).map_err(|_| CborError::ItemTooLong)?;
        let chunk = r.read_bytes(len)?;
        copy_into(out, 0, chunk)?;
        len
    } else {
        let mut written = 0usize;
        loop {
            if peek_is_break(r) {
                read_break(r)?;
                break;
            }
            let chunk_head = read_head(r)?;
            if chunk_head.major != MAJOR_TEXT {
                return Err(CborError::IndefMismatch);
            }
            if chunk_head.indefinite {
                return Err(CborError::IndefNesting);
            }
            let len = usize::try_from(chunk_head.arg).map_err(|_| CborError::ItemTooLong)?;
            let chunk = r.read_bytes(len)?;
            copy_into(out, written, chunk)?;
            written += len;
        }
        written
    };
    core::str::from_utf8(&out[..written]).map_err(|_| CborError::InvalidUtf8)
}

fn copy_into(out: &mut [u8], offset: usize, data: &[u8]) -> CborResult<()> {
    let end = offset.checked_add(data.len()).ok_or(CborError::ItemTooLong)?;
    let dst = out.get_mut(offset..end).ok_or(CborError::BufferTooSmall)?;
    dst.copy_from_slice(data);
    Ok(())
}

/// Walk one CBOR value — scalar, string, tag, array or map — consuming it
/// from the stream without building any owned representation. Container
/// nesting is bounded by `limits.max_depth`
/// ([`CborError::Recursion`] past it).
///
/// This is the building block for "decode a value whose shape you don't
/// need to keep," and for validating a buffer is well-formed CBOR.
pub fn skip_value(r: &mut ByteReader<'_>, limits: &Limits) -> CborResult<()> {
    skip_value_at(r, limits, 0)
}

fn skip_value_at(r: &mut ByteReader<'_>, limits: &Limits, depth: u8) -> CborResult<()> {
    if depth > limits.max_depth {
        return Err(CborError::Recursion);
    }
    let head = read_head(r)?;
    match head.major {
        MAJOR_UINT | MAJOR_NINT => Ok(()),
        MAJOR_BYTES | MAJOR_TEXT => skip_string_chunks(r, head.major, head.indefinite, head.arg),
        MAJOR_ARRAY => {
            if head.indefinite {
                while !peek_is_break(r) {
                    skip_value_at(r, limits, depth + 1)?;
                }
                read_break(r)
            } else {
                for _ in 0..head.arg {
                    skip_value_at(r, limits, depth + 1)?;
                }
                Ok(())
            }
        }
        MAJOR_MAP => {
            if head.indefinite {
                while !peek_is_break(r) {
                    skip_value_at(r, limits, depth + 1)?;
                    skip_value_at(r, limits, depth + 1)?;
                }
                read_break(r)
            } else {
                let pairs = head.arg.checked_mul(2).ok_or(CborError::MapLength)?;
                for _ in 0..pairs {
                    skip_value_at(r, limits, depth + 1)?;
                }
                Ok(())
            }
        }
        MAJOR_TAG => skip_value_at(r, limits, depth + 1),
        MAJOR_SIMPLE => {
            if head.indefinite {
                Err(CborError::UnexpectedBreak)
            } else {
                Ok(())
            }
        }
        _ => unreachable!("major type is masked to 3 bits"),
    }
}

fn skip_string_chunks(r: &mut ByteReader<'_>, major: u8, indefinite: bool, len: u64) -> CborResult<()> {
    if !indefinite {
        let len = usize::try_from(len).map_err(|_| CborError::ItemTooLong)?;
        r.read_bytes(len)?;
        return Ok(());
    }
    loop {
        if peek_is_break(r) {
            return read_break(r);
        }
        let chunk_head = read_head(r)?;
        if chunk_head.major != major {
            return Err(CborError::IndefMismatch);
        }
        if chunk_head.indefinite {
            return Err(CborError::IndefNesting);
        }
        let len = usize::try_from(chunk_head.arg).map_err(|_| CborError::ItemTooLong)?;
        r.read_bytes(len)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{write_bytes, write_int64, write_text, write_uint64};

    #[test]
    fn indefinite_bytes_concatenate() {
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        write_bytes_indefinite_start(&mut w).unwrap();
        write_bytes(&mut w, b"abc").unwrap();
        write_bytes(&mut w, b"def").unwrap();
        head::write_break(&mut w).unwrap();

        let mut r = ByteReader::new(w.as_slice());
        let mut out = [0u8; 16];
        let n = read_bytes_into(&mut r, &mut out).unwrap();
        assert_eq!(&out[..n], b"abcdef");
    }

    #[test]
    fn indefinite_text_concatenates_and_validates_utf8() {
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        write_text_indefinite_start(&mut w).unwrap();
        write_text(&mut w, "hello").unwrap();
        write_text(&mut w, " world").unwrap();
        head::write_break(&mut w).unwrap();

        let mut r = ByteReader::new(w.as_slice());
        let mut out = [0u8; 32];
        let s = read_text_into(&mut r, &mut out).unwrap();
        assert_eq!(s, "hello world");
    }

    #[test]
    fn mismatched_chunk_major_rejected() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_bytes_indefinite_start(&mut w).unwrap();
        write_text(&mut w, "oops").unwrap();
        head::write_break(&mut w).unwrap();

        let mut r = ByteReader::new(w.as_slice());
        let mut out = [0u8; 16];
        assert_eq!(read_bytes_into(&mut r, &mut out), Err(CborError::IndefMismatch));
    }

    #[test]
    fn nested_indefinite_chunk_rejected() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_bytes_indefinite_start(&mut w).unwrap();
        write_bytes_indefinite_start(&mut w).unwrap(); // chunk itself indefinite
        let mut r = ByteReader::new(w.as_slice());
        let mut out = [0u8; 16];
        assert_eq!(read_bytes_into(&mut r, &mut out), Err(CborError::IndefNesting));
    }

    #[test]
    fn skip_consumes_definite_string_payload() {
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        write_text(&mut w, "hello").unwrap();
        write_uint64(&mut w, 1).unwrap();

        let limits = Limits::default();
        let mut r = ByteReader::new(w.as_slice());
        skip_value(&mut r, &limits).unwrap();
        skip_value(&mut r, &limits).unwrap();
        assert_eq!(r.read_avail(), 0);
    }

    #[test]
    fn skip_map_with_definite_text_keys_leaves_cursor_at_end() {
        // {"a": 1, "b": [2, 3]}
        let mut buf = [0u8; 32];
        let mut w = ByteWriter::new(&mut buf);
        crate::primitive::write_map_header(&mut w, 2).unwrap();
        write_text(&mut w, "a").unwrap();
        write_uint64(&mut w, 1).unwrap();
        write_text(&mut w, "b").unwrap();
        crate::primitive::write_array_header(&mut w, 2).unwrap();
        write_uint64(&mut w, 2).unwrap();
        write_uint64(&mut w, 3).unwrap();

        let limits = Limits::default();
        let mut r = ByteReader::new(w.as_slice());
        skip_value(&mut r, &limits).unwrap();
        assert_eq!(r.read_avail(), 0);
    }

    #[test]
    fn skip_scalar_and_container_values() {
        let mut buf = [0u8; 64];
        let mut w = ByteWriter::new(&mut buf);
        write_uint64(&mut w, 42).unwrap();
        write_int64(&mut w, -7).unwrap();
        write_array_header_helper(&mut w);

        let limits = Limits::default();
        let mut r = ByteReader::new(w.as_slice());
        skip_value(&mut r, &limits).unwrap();
        skip_value(&mut r, &limits).unwrap();
        skip_value(&mut r, &limits).unwrap();
        assert_eq!(r.read_avail(), 0);
    }

    fn write_array_header_helper(w: &mut ByteWriter<'_>) {
        use crate::primitive::write_array_header;
        write_array_header(w, 2).unwrap();
        write_uint64(w, 1).unwrap();
        write_uint64(w, 2).unwrap();
    }

    #[test]
    fn recursion_limit_enforced() {
        // 20 nested one-element arrays, deeper than the default limit of 16.
        let mut buf = [0u8; 128];
        let mut w = ByteWriter::new(&mut buf);
        for _ in 0..20 {
            crate::primitive::write_array_header(&mut w, 1).unwrap();
        }
        write_uint64(&mut w, 0).unwrap();

        let limits = Limits::default();
        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(skip_value(&mut r, &limits), Err(CborError::Recursion));
    }

    #[test]
    fn indefinite_map_with_odd_break_is_unexpected() {
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        write_map_indefinite_start(&mut w).unwrap();
        write_uint64(&mut w, 1).unwrap(); // key only, then break — malformed
        head::write_break(&mut w).unwrap();

        let limits = Limits::default();
        let mut r = ByteReader::new(w.as_slice());
        assert_eq!(skip_value(&mut r, &limits), Err(CborError::UnexpectedBreak));
    }
}
