//! Table-driven CRC-32C (Castagnoli), polynomial `0x1EDC6F41` reflected.
//!
//! Grounded on `original_source/src/crc32c.c`: same reflected-poly,
//! byte-at-a-time, init/final-XOR-0xFFFFFFFF shape. The table itself is
//! generated at compile time instead of hand-maintained, since Rust's
//! `const fn` makes the generated-header step the original relied on
//! unnecessary.

/// Initial CRC value for a fresh message (`CRC32C_INIT`).
pub const INIT: u32 = 0;

/// The residue any message, followed by its own little-endian CRC, must
/// produce when fed back through [`update`] (`CRC32C_OK_REM`).
pub const OK_REMAINDER: u32 = 0x4867_4bc7;

const POLY: u32 = 0x82F6_3B78; // bit-reversal of 0x1EDC6F41

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLY
            } else {
                crc >> 1
            };
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static TABLE: [u32; 256] = build_table();

/// Fold `data` into the running CRC `crc`, applying the initial and final
/// XOR internally — callers always pass [`INIT`] for a fresh message and
/// feed the previous return value back in to extend it.
#[must_use]
pub fn update(crc: u32, data: &[u8]) -> u32 {
    let mut c = crc ^ 0xFFFF_FFFF;
    for &byte in data {
        let idx = ((c ^ u32::from(byte)) & 0xFF) as usize;
        c = (c >> 8) ^ TABLE[idx];
    }
    c ^ 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        // Standard CRC-32C check value for the ASCII string "123456789".
        assert_eq!(update(INIT, b"123456789"), 0xE306_9283);
    }

    #[test]
    fn residue_property() {
        let msg = b"the quick brown fox";
        let crc = update(INIT, msg);
        let mut full = msg.to_vec();
        full.extend_from_slice(&crc.to_le_bytes());
        assert_eq!(update(INIT, &full), OK_REMAINDER);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let msg = b"split across two calls";
        let one_shot = update(INIT, msg);
        let incremental = update(update(INIT, &msg[..10]), &msg[10..]);
        assert_eq!(one_shot, incremental);
    }
}
