//! Cursor-level scanning helpers for JEDEC text
//!
//! Every helper works on an immutable buffer and an integer position and
//! returns the position after what it consumed. Nothing here allocates.

use crate::JedecError;

/// Number parsed out of the buffer along with the position after its last digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    /// Parsed value
    pub value: u32,
    /// Position of the first byte after the digits
    pub end: usize,
}

/// Scan an unsigned decimal number starting at `pos`
///
/// At least one digit is required. Overflow of `u32` is rejected.
pub fn scan_decimal(buffer: &[u8], pos: usize) -> Result<Scanned, JedecError> {
    scan_radix(buffer, pos, 10)
}

/// Scan an unsigned hexadecimal number starting at `pos`
///
/// Digits are case-insensitive. At least one digit is required.
pub fn scan_hex(buffer: &[u8], pos: usize) -> Result<Scanned, JedecError> {
    scan_radix(buffer, pos, 16)
}

fn scan_radix(buffer: &[u8], pos: usize, radix: u32) -> Result<Scanned, JedecError> {
    let mut value: u32 = 0;
    let mut end = pos;

    while let Some(digit) = buffer.get(end).and_then(|&b| digit_value(b, radix)) {
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(JedecError::BadFormat)?;
        end += 1;
    }

    if end == pos {
        return Err(JedecError::BadFormat);
    }

    Ok(Scanned { value, end })
}

fn digit_value(byte: u8, radix: u32) -> Option<u32> {
    (byte as char).to_digit(radix)
}

/// Case-insensitive match of a token code at `pos`
pub fn match_code(buffer: &[u8], pos: usize, code: &[u8]) -> bool {
    buffer
        .get(pos..pos + code.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(code))
}

/// Position of the first `needle` in `buffer[from..end]`
pub fn find_byte(buffer: &[u8], from: usize, end: usize, needle: u8) -> Option<usize> {
    let end = end.min(buffer.len());
    if from >= end {
        return None;
    }
    buffer[from..end]
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}

/// Bytes that may separate fuse digits: whitespace and control characters
pub const fn is_fuse_separator(byte: u8) -> bool {
    byte == b' ' || byte.is_ascii_control()
}
