//! Consistent-overhead byte-stuffing (COBS): eliminates zero runs so 0x00
//! can be used as an unambiguous frame delimiter, at a cost of one
//! overhead byte per 254 input bytes.
//!
//! Grounded on `original_source/src/cobs.c` (itself implementing Cheshire's
//! COBS paper): same "code byte counts non-zero bytes up to the next zero
//! or 254, whichever comes first" structure on encode, same "read a code,
//! copy `code-1` literals, emit a zero unless code was 255" structure on
//! decode.

use crate::error::Error;

/// Upper bound on the encoded size of an `n`-byte input: `ceil(n/254) + n`,
/// with a minimum of 1 (even empty input encodes as a single code byte).
#[must_use]
pub fn encoded_len(n: usize) -> usize {
    (n + 253) / 254 + n + 1
}

/// Encode `input` into `out`, returning the number of bytes written.
/// `out` must be at least [`encoded_len`]`(input.len())` bytes. The
/// output never contains a `0x00` byte; the caller appends the `0x00`
/// frame terminator itself.
pub fn encode(input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    if out.is_empty() || out.len() < encoded_len(input.len()) {
        return Err(Error::BufferTooSmall);
    }

    let mut nout = 0usize; // bytes finalized into `out`
    let mut code_pos = 0usize; // index of the current block's code byte
    let mut code = 1u8;
    let mut last_max = false;

    for &byte in input {
        last_max = false;
        if byte == 0 {
            out[code_pos] = code;
            nout += code as usize;
            code_pos = nout;
            code = 1;
        } else {
            let write_at = code_pos + code as usize;
            if write_at >= out.len() {
                return Err(Error::BufferTooSmall);
            }
            out[write_at] = byte;
            code += 1;
            if code == 255 {
                out[code_pos] = code;
                nout += code as usize;
                code_pos = nout;
                code = 1;
                last_max = true;
            }
        }
    }
    if !last_max {
        out[code_pos] = code;
        nout += code as usize;
    }
    Ok(nout)
}

/// Decode `input` (which must contain no `0x00` byte) into `out`,
/// returning the number of bytes written.
pub fn decode(input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    if input.contains(&0u8) {
        return Err(Error::InvalidInput);
    }

    let mut in_pos = 0usize;
    let mut nout = 0usize;
    let mut pending_zero = false;
    let mut code = 0u8;

    while in_pos < input.len() {
        if code == 0 {
            if pending_zero {
                if nout >= out.len() {
                    return Err(Error::BufferTooSmall);
                }
                out[nout] = 0;
                nout += 1;
            }
            code = input[in_pos];
            in_pos += 1;
            pending_zero = code != 255;
            code -= 1;
        } else {
            if nout >= out.len() {
                return Err(Error::BufferTooSmall);
            }
            out[nout] = input[in_pos];
            nout += 1;
            in_pos += 1;
            code -= 1;
        }
    }
    if code > 0 {
        return Err(Error::Truncated);
    }
    Ok(nout)
}
