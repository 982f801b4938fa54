//! Intel-HEX program image loader.
//!
//! Parses the subset of Intel-HEX that toolchains emit for flat images:
//! 1. **Data records (00):** Bytes are packed little-endian into 32-bit
//!    words at `base + offset`.
//! 2. **End of file (01):** Required; records after it are ignored.
//! 3. **Extended addresses (02, 04):** Segment (`<< 4`) and linear
//!    (`<< 16`) base contributions.
//! 4. **Start addresses (03, 05):** Parsed and ignored; the machine always
//!    boots at address zero.
//!
//! Any other record type, a bad checksum, or a write past the configured
//! capacity is an error carrying the 1-based line number.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::{LoadError, Word};

/// Loads an Intel-HEX image from disk into a word vector of exactly
/// `capacity_words` words.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise any
/// parse error from [`load_hex_str`].
pub fn load_hex_file(path: &Path, capacity_words: usize) -> Result<Vec<Word>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let words = load_hex_str(&text, capacity_words)?;
    debug!(path = %path.display(), words = capacity_words, "image loaded");
    Ok(words)
}

/// Parses an Intel-HEX image into a zero-filled word vector of exactly
/// `capacity_words` words.
///
/// # Errors
///
/// Returns a [`LoadError`] describing the first malformed record, an
/// out-of-capacity write, or a missing end-of-file record.
pub fn load_hex_str(text: &str, capacity_words: usize) -> Result<Vec<Word>, LoadError> {
    let mut words = vec![0; capacity_words];
    let mut base: u32 = 0;
    let mut terminated = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        // Lines without a start code are commentary, not records.
        let Some(record) = trimmed.strip_prefix(':') else {
            continue;
        };
        let bytes = decode_record(record, line)?;

        // count, offset (2), type, checksum.
        if bytes.len() < 5 {
            return Err(LoadError::Truncated { line });
        }
        let count = usize::from(bytes[0]);
        if bytes.len() != count + 5 {
            return Err(LoadError::Truncated { line });
        }
        let sum = bytes.iter().fold(0_u8, |acc, &b| acc.wrapping_add(b));
        if sum != 0 {
            return Err(LoadError::Checksum { line });
        }

        let offset = (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
        let kind = bytes[3];
        let data = &bytes[4..4 + count];

        match kind {
            0x00 => {
                for (i, &byte) in data.iter().enumerate() {
                    let address = base.wrapping_add(offset).wrapping_add(i as u32);
                    let shift = (address % 4) * 8;
                    let slot = words
                        .get_mut((address / 4) as usize)
                        .ok_or(LoadError::OutOfRange { line, address })?;
                    *slot = (*slot & !(0xFF << shift)) | (u32::from(byte) << shift);
                }
            }
            0x01 => {
                terminated = true;
                break;
            }
            0x02 | 0x04 => {
                if count != 2 {
                    return Err(LoadError::BadExtendedAddress { line });
                }
                let segment = (u32::from(data[0]) << 8) | u32::from(data[1]);
                base = if kind == 0x02 {
                    segment << 4
                } else {
                    segment << 16
                };
            }
            // Start-address records: the machine boots at zero regardless.
            0x03 | 0x05 => {}
            other => return Err(LoadError::UnknownRecord { line, kind: other }),
        }
    }

    if !terminated {
        return Err(LoadError::MissingTerminator);
    }
    Ok(words)
}

/// Decodes the hex-pair body of one record into raw bytes.
fn decode_record(record: &str, line: usize) -> Result<Vec<u8>, LoadError> {
    if record.len() % 2 != 0 {
        return Err(LoadError::Truncated { line });
    }
    let mut bytes = Vec::with_capacity(record.len() / 2);
    for pair in record.as_bytes().chunks_exact(2) {
        let hi = hex_digit(pair[0]).ok_or(LoadError::InvalidDigit { line })?;
        let lo = hex_digit(pair[1]).ok_or(LoadError::InvalidDigit { line })?;
        bytes.push((hi << 4) | lo);
    }
    Ok(bytes)
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
