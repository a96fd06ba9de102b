//! Framing validation for JEDEC buffers
//!
//! A JEDEC buffer carries exactly one STX and one ETX. The bytes from STX
//! through ETX form the framed region; the four hex digits right after ETX
//! are the declared file checksum.

use crate::checksum::file_checksum;
use crate::format::constants::{ETX, FILE_CHECKSUM_DIGITS, STX};
use crate::validation::parsing::scan_hex;
use crate::JedecError;

/// Location and checksums of the framed region of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Offset of the STX marker
    pub start: usize,
    /// Offset of the ETX marker
    pub end: usize,
    /// Checksum written after ETX
    pub declared_checksum: u16,
    /// Byte sum of STX through ETX inclusive
    pub computed_checksum: u16,
}

impl Frame {
    /// Framed bytes, STX and ETX included
    pub fn region<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start..=self.end]
    }
}

/// Locate the framing markers and read the trailing file checksum
///
/// Fails with [`JedecError::BadFormat`] when either marker is missing or
/// repeated (a repeated marker usually means a binary file), when ETX comes
/// before STX, or when the trailer is not exactly four hex digits.
pub fn scan_frame(buffer: &[u8]) -> Result<Frame, JedecError> {
    let mut start = None;
    let mut end = None;

    for (offset, &byte) in buffer.iter().enumerate() {
        let slot = match byte {
            STX => &mut start,
            ETX => &mut end,
            _ => continue,
        };
        if slot.replace(offset).is_some() {
            return Err(JedecError::BadFormat);
        }
    }

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(JedecError::BadFormat),
    };

    let computed_checksum = file_checksum(&buffer[start..=end]);
    let declared_checksum = parse_trailer(buffer, end + 1)?;

    Ok(Frame {
        start,
        end,
        declared_checksum,
        computed_checksum,
    })
}

fn parse_trailer(buffer: &[u8], pos: usize) -> Result<u16, JedecError> {
    let scanned = scan_hex(buffer, pos)?;
    if scanned.end - pos != FILE_CHECKSUM_DIGITS {
        return Err(JedecError::BadFormat);
    }
    // Four hex digits always fit in 16 bits
    u16::try_from(scanned.value).map_err(|_| JedecError::BadFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_frame() {
        let buffer = b"header\x02QF8*\x03BEEF\r\n";
        let frame = scan_frame(buffer).unwrap();

        assert_eq!(frame.start, 6);
        assert_eq!(frame.end, 11);
        assert_eq!(frame.declared_checksum, 0xBEEF);
        assert_eq!(frame.region(buffer), b"\x02QF8*\x03");

        let expected = [0x02u16, b'Q' as u16, b'F' as u16, b'8' as u16, b'*' as u16, 0x03]
            .iter()
            .sum::<u16>();
        assert_eq!(frame.computed_checksum, expected);
    }

    #[test]
    fn test_trailer_at_end_of_buffer() {
        let frame = scan_frame(b"\x02\x03abcd").unwrap();
        assert_eq!(frame.declared_checksum, 0xABCD);
        assert_eq!(frame.computed_checksum, 0x05);
    }

    #[test]
    fn test_marker_counts() {
        assert_eq!(scan_frame(b"QF8*\x031234"), Err(JedecError::BadFormat));
        assert_eq!(scan_frame(b"\x02QF8*1234"), Err(JedecError::BadFormat));
        assert_eq!(
            scan_frame(b"\x02\x02QF8*\x031234"),
            Err(JedecError::BadFormat)
        );
        assert_eq!(
            scan_frame(b"\x02QF8*\x03\x031234"),
            Err(JedecError::BadFormat)
        );
        assert_eq!(scan_frame(b""), Err(JedecError::BadFormat));
    }

    #[test]
    fn test_end_before_start() {
        assert_eq!(scan_frame(b"\x031234\x02"), Err(JedecError::BadFormat));
    }

    #[test]
    fn test_trailer_length() {
        assert_eq!(scan_frame(b"\x02\x03123\r\n"), Err(JedecError::BadFormat));
        assert_eq!(scan_frame(b"\x02\x0312345\r\n"), Err(JedecError::BadFormat));
        assert_eq!(scan_frame(b"\x02\x03\r\n"), Err(JedecError::BadFormat));
        assert_eq!(scan_frame(b"\x02\x03"), Err(JedecError::BadFormat));
        assert!(scan_frame(b"\x02\x031234\r\n").is_ok());
    }
}
