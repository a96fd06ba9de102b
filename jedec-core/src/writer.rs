//! JEDEC serializer
//!
//! Produces the canonical layout: header block, scalar tokens, fixed-width
//! fuse rows, fuse checksum, end marker and file checksum. Lines end with
//! CRLF.

use alloc::string::String;
use alloc::vec::Vec;

use crate::checksum::{file_checksum, FuseChecksum};
use crate::format::constants::{
    codes, DEFAULT_DEVICE_NAME, DEFAULT_NOTE, DEFAULT_ROW_WIDTH, DELIMITER, ETX, STX,
};
use crate::format::JedecRecord;
use crate::{JedecError, Result};

const CRLF: &[u8] = b"\r\n";

/// Layout settings for the serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Fuses per `L` row
    pub row_width: usize,
    /// Text of the `NOTE:` header line
    pub note: String,
}

impl WriterConfig {
    /// Set fuses per row; zero falls back to [`DEFAULT_ROW_WIDTH`]
    pub fn with_row_width(mut self, row_width: usize) -> Self {
        self.row_width = row_width;
        self
    }

    /// Set the header note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Effective row width
    pub fn row_width(&self) -> usize {
        if self.row_width == 0 {
            DEFAULT_ROW_WIDTH
        } else {
            self.row_width
        }
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            row_width: DEFAULT_ROW_WIDTH,
            note: String::from(DEFAULT_NOTE),
        }
    }
}

/// Serialize a record into a complete JEDEC file image
///
/// `fuse_count` decides how many fuses are written; positions the fuse map
/// does not cover are written as `0`. Both checksums are derived from the
/// emitted bytes, the record's declared values are ignored.
pub fn serialize(record: &JedecRecord, config: &WriterConfig) -> Result<Vec<u8>> {
    let fuse_count = record.fuse_count as usize;
    let row_width = config.row_width();

    let mut out = Vec::new();
    out.try_reserve(estimated_size(record, config, fuse_count, row_width))
        .map_err(|_| JedecError::MemoryExhausted)?;

    write_header(&mut out, record, config);
    let fuse_checksum = write_fuses(&mut out, record, fuse_count, row_width);

    out.push(DELIMITER);
    out.extend_from_slice(CRLF);
    out.extend_from_slice(codes::FUSE_CHECKSUM);
    push_hex4(&mut out, fuse_checksum);
    out.push(DELIMITER);
    out.extend_from_slice(CRLF);
    out.push(ETX);

    // Everything so far is the framed region, STX is the first byte
    let checksum = file_checksum(&out);
    push_hex4(&mut out, checksum);
    out.extend_from_slice(CRLF);

    Ok(out)
}

fn write_header(out: &mut Vec<u8>, record: &JedecRecord, config: &WriterConfig) {
    let device_name = record.device_name.as_deref().unwrap_or(DEFAULT_DEVICE_NAME);

    out.push(STX);
    out.extend_from_slice(CRLF);
    out.extend_from_slice(b"Device: ");
    push_text(out, device_name);
    out.extend_from_slice(CRLF);
    out.extend_from_slice(CRLF);
    out.extend_from_slice(b"NOTE: ");
    push_text(out, &config.note);
    out.push(DELIMITER);
    out.extend_from_slice(CRLF);
    out.extend_from_slice(CRLF);

    for (code, value) in [
        (codes::PIN_COUNT, record.pin_count),
        (codes::FUSE_COUNT, record.fuse_count),
        (codes::DEFAULT_FUSE, record.default_fuse),
        (codes::SECURITY, record.security_flag),
    ] {
        out.extend_from_slice(code);
        push_decimal(out, value, 1);
        out.push(DELIMITER);
        out.extend_from_slice(CRLF);
    }
    out.extend_from_slice(CRLF);
}

/// Emit the `L` rows and return the fuse checksum
fn write_fuses(
    out: &mut Vec<u8>,
    record: &JedecRecord,
    fuse_count: usize,
    row_width: usize,
) -> u16 {
    let mut checksum = FuseChecksum::new();

    for index in 0..fuse_count {
        if index % row_width == 0 {
            if index != 0 {
                out.push(DELIMITER);
                out.extend_from_slice(CRLF);
            }
            out.extend_from_slice(codes::FUSE_LIST);
            push_decimal(out, index as u64, 4);
            out.push(b' ');
        }
        let value = record.fuse(index).unwrap_or(false);
        out.push(if value { b'1' } else { b'0' });
        checksum.update(index, value);
    }

    checksum.value()
}

fn estimated_size(
    record: &JedecRecord,
    config: &WriterConfig,
    fuse_count: usize,
    row_width: usize,
) -> usize {
    const FIXED: usize = 128;
    const ROW_OVERHEAD: usize = 16;

    let name_len = record
        .device_name
        .as_deref()
        .map_or(DEFAULT_DEVICE_NAME.len(), str::len);
    let rows = fuse_count.div_ceil(row_width);

    FIXED
        .saturating_add(name_len)
        .saturating_add(config.note.len())
        .saturating_add(fuse_count)
        .saturating_add(rows.saturating_mul(ROW_OVERHEAD))
}

/// Append free header text
///
/// `*` and the framing markers would end the header early, so they are
/// written as spaces.
fn push_text(out: &mut Vec<u8>, text: &str) {
    out.extend(text.bytes().map(|byte| match byte {
        DELIMITER | STX | ETX => b' ',
        other => other,
    }));
}

/// Append `value` in decimal, zero-padded to `min_width` digits
fn push_decimal(out: &mut Vec<u8>, value: impl Into<u64>, min_width: usize) {
    let mut digits = [0u8; 20];
    let mut len = 0;
    let mut remaining: u64 = value.into();

    loop {
        digits[len] = b'0' + (remaining % 10) as u8;
        len += 1;
        remaining /= 10;
        if remaining == 0 {
            break;
        }
    }

    for _ in len..min_width {
        out.push(b'0');
    }
    out.extend(digits[..len].iter().rev());
}

/// Append `value` as four uppercase hex digits
fn push_hex4(out: &mut Vec<u8>, value: u16) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for shift in [12, 8, 4, 0] {
        out.push(HEX[usize::from((value >> shift) & 0x0F)]);
    }
}
