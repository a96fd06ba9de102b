//! Token parser for JEDEC fuse maps
//!
//! The framed region is walked with an integer cursor over the immutable
//! input buffer. Each step skips to the next letter, tries the recognized
//! token codes at that position, applies the token to the record and then
//! moves past the next `*` delimiter.
//!
//! Real-world files carry arbitrary text before the first token, so a code
//! whose value fails to parse is ignored until the first token has been
//! accepted. From then on the same failure is fatal.

use crate::checksum::FuseChecksum;
use crate::format::constants::{codes, DELIMITER};
use crate::format::JedecRecord;
use crate::fuse_map::FuseMap;
use crate::validation::framing::{scan_frame, Frame};
use crate::validation::parsing::{
    find_byte, is_fuse_separator, match_code, scan_decimal, scan_hex, Scanned,
};
use crate::{JedecError, Result};

/// Token codes understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    PinCount,
    FuseCount,
    Security,
    DefaultFuse,
    FuseChecksum,
    FuseList,
}

impl Token {
    /// Match order; two-letter codes come before one-letter ones
    const PRIORITY: [Token; 6] = [
        Token::PinCount,
        Token::FuseCount,
        Token::Security,
        Token::DefaultFuse,
        Token::FuseChecksum,
        Token::FuseList,
    ];

    const fn code(self) -> &'static [u8] {
        match self {
            Token::PinCount => codes::PIN_COUNT,
            Token::FuseCount => codes::FUSE_COUNT,
            Token::Security => codes::SECURITY,
            Token::DefaultFuse => codes::DEFAULT_FUSE,
            Token::FuseChecksum => codes::FUSE_CHECKSUM,
            Token::FuseList => codes::FUSE_LIST,
        }
    }

    fn scan_value(self, buffer: &[u8], pos: usize) -> Result<Scanned> {
        match self {
            Token::FuseChecksum => scan_hex(buffer, pos),
            _ => scan_decimal(buffer, pos),
        }
    }
}

/// Parser state threaded through the token loop
#[derive(Debug, Default)]
struct ParseState {
    pin_count_set: bool,
    fuse_count_set: bool,
    default_fuse_set: bool,
    security_set: bool,
    checksum_set: bool,
    /// At least one token has been accepted
    valid_token: bool,
    /// Allocated on the first fuse list
    fuses: Option<FuseMap>,
    checksum: FuseChecksum,
}

impl ParseState {
    /// Flip a set-once flag, rejecting a second occurrence
    fn set_once(flag: &mut bool) -> Result<()> {
        if *flag {
            return Err(JedecError::BadFormat);
        }
        *flag = true;
        Ok(())
    }
}

/// Parse a complete JEDEC buffer
///
/// The buffer must contain exactly one framed region followed by its file
/// checksum. Declared checksums are reported, never enforced.
pub fn parse(buffer: &[u8]) -> Result<JedecRecord> {
    let frame = scan_frame(buffer)?;

    let mut record = JedecRecord {
        declared_file_checksum: frame.declared_checksum,
        computed_file_checksum: frame.computed_checksum,
        ..JedecRecord::default()
    };
    let mut state = ParseState::default();

    parse_tokens(buffer, &frame, &mut record, &mut state)?;

    record.fuses = state.fuses.take();
    record.computed_fuse_checksum = state.checksum.value();
    Ok(record)
}

fn parse_tokens(
    buffer: &[u8],
    frame: &Frame,
    record: &mut JedecRecord,
    state: &mut ParseState,
) -> Result<()> {
    let mut cursor = frame.start;

    loop {
        cursor = match skip_to_letter(buffer, cursor, frame.end) {
            Some(pos) => pos,
            None => return Ok(()),
        };

        if let Some((token, value)) = match_token(buffer, cursor, state)? {
            apply_token(buffer, frame, token, value, record, state)?;
        }

        cursor = match find_byte(buffer, cursor, frame.end, DELIMITER) {
            Some(pos) => pos + 1,
            None => return Ok(()),
        };
    }
}

/// Advance to the next ASCII letter before `end`
fn skip_to_letter(buffer: &[u8], from: usize, end: usize) -> Option<usize> {
    (from..end).find(|&pos| buffer[pos].is_ascii_alphabetic())
}

/// Try every token code at `pos`
///
/// Returns `None` for text that is not a token, or for a malformed token
/// while nothing has been accepted yet.
fn match_token(
    buffer: &[u8],
    pos: usize,
    state: &ParseState,
) -> Result<Option<(Token, Scanned)>> {
    for token in Token::PRIORITY {
        let code = token.code();
        if !match_code(buffer, pos, code) {
            continue;
        }
        match token.scan_value(buffer, pos + code.len()) {
            Ok(value) => return Ok(Some((token, value))),
            Err(err) if state.valid_token => return Err(err),
            Err(_) => {}
        }
    }
    Ok(None)
}

fn apply_token(
    buffer: &[u8],
    frame: &Frame,
    token: Token,
    value: Scanned,
    record: &mut JedecRecord,
    state: &mut ParseState,
) -> Result<()> {
    match token {
        Token::PinCount => {
            ParseState::set_once(&mut state.pin_count_set)?;
            record.pin_count = value.value;
        }
        Token::FuseCount => {
            ParseState::set_once(&mut state.fuse_count_set)?;
            record.fuse_count = value.value;
        }
        Token::Security => {
            ParseState::set_once(&mut state.security_set)?;
            record.security_flag = value.value;
        }
        Token::DefaultFuse => {
            ParseState::set_once(&mut state.default_fuse_set)?;
            record.default_fuse = value.value;
        }
        Token::FuseChecksum => {
            ParseState::set_once(&mut state.checksum_set)?;
            let checksum = u16::try_from(value.value).map_err(|_| JedecError::BadFormat)?;
            record.declared_fuse_checksum = Some(checksum);
        }
        Token::FuseList => {
            // Fuse lists need QF and may not follow C
            if state.checksum_set || !state.fuse_count_set {
                return Err(JedecError::BadFormat);
            }
            return read_fuse_list(buffer, frame, value, record, state);
        }
    }
    state.valid_token = true;
    Ok(())
}

fn read_fuse_list(
    buffer: &[u8],
    frame: &Frame,
    offset: Scanned,
    record: &JedecRecord,
    state: &mut ParseState,
) -> Result<()> {
    let fuses = match &mut state.fuses {
        Some(fuses) => fuses,
        slot => {
            let len =
                usize::try_from(record.fuse_count).map_err(|_| JedecError::MemoryExhausted)?;
            // F0 or no F token at all clears every fuse
            let fill = state.default_fuse_set && record.default_fuse != 0;
            state.checksum.reset();
            slot.insert(FuseMap::try_new(len, fill)?)
        }
    };

    // Fuse digits may be split over several lines
    let mut index = offset.value as usize;
    for &byte in &buffer[offset.end..frame.end] {
        match byte {
            DELIMITER => return Ok(()),
            b'0' | b'1' => {
                let value = byte == b'1';
                fuses.set(index, value)?;
                state.checksum.update(index, value);
                index += 1;
            }
            _ if is_fuse_separator(byte) => {}
            _ => return Err(JedecError::BadFormat),
        }
    }

    // Hit ETX before the delimiter
    Err(JedecError::BadFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_minimal_file() {
        let record = parse(b"\x02QF8*F0*L0000 10101010*C00AA*\x031234\r\n").unwrap();

        assert_eq!(record.fuse_count, 8);
        assert_eq!(record.default_fuse, 0);
        assert_eq!(
            record.fuses.as_ref().unwrap().to_bools(),
            vec![true, false, true, false, true, false, true, false]
        );

        let expected = [0usize, 2, 4, 6].iter().map(|&i| 1u16 << (i % 8)).sum::<u16>();
        assert_eq!(record.computed_fuse_checksum, expected);
        assert_eq!(record.computed_fuse_checksum, 0x55);
        assert_eq!(record.declared_fuse_checksum, Some(0xAA));
        assert_eq!(record.declared_file_checksum, 0x1234);
    }

    #[test]
    fn test_header_fields() {
        let buffer = b"\x02\r\nDevice: GAL22V10\r\n*\r\nQP24*\r\nQF16*\r\nF1*\r\nG0*\r\nL0004 0000*\r\n\x030000\r\n";
        let record = parse(buffer).unwrap();

        assert_eq!(record.pin_count, 24);
        assert_eq!(record.fuse_count, 16);
        assert_eq!(record.default_fuse, 1);
        assert_eq!(record.security_flag, 0);
        assert_eq!(record.declared_fuse_checksum, None);

        // F1 fills with ones, the fuse list clears 4..8
        let fuses = record.fuses.unwrap();
        for index in 0..16 {
            assert_eq!(fuses.get(index), Some(!(4..8).contains(&index)), "fuse {index}");
        }
        assert_eq!(record.computed_fuse_checksum, 0);
    }

    #[test]
    fn test_lowercase_codes() {
        let record = parse(b"\x02qp20*qf4*f0*l0 1111*c000f*\x030000\r\n").unwrap();
        assert_eq!(record.pin_count, 20);
        assert_eq!(record.fuse_count, 4);
        assert_eq!(record.declared_fuse_checksum, Some(0x0F));
        assert_eq!(record.computed_fuse_checksum, 0x0F);
    }

    #[test]
    fn test_multi_line_fuse_list() {
        let buffer = b"\x02QF12*L0000\r\n1111\r\n0000\r\n  1 1 0 0*\r\n\x030000\r\n";
        let record = parse(buffer).unwrap();
        let fuses = record.fuses.unwrap();

        assert_eq!(
            fuses.to_bools(),
            vec![true, true, true, true, false, false, false, false, true, true, false, false]
        );
        assert_eq!(record.computed_fuse_checksum, 0x0F + 0x01 + 0x02);
    }

    #[test]
    fn test_multiple_fuse_lists() {
        let buffer = b"\x02QF16*L0000 1*L0008 1*L0015 1*\x030000\r\n";
        let record = parse(buffer).unwrap();
        let fuses = record.fuses.unwrap();

        assert_eq!(fuses.count_ones(), 3);
        assert_eq!(fuses.get(0), Some(true));
        assert_eq!(fuses.get(8), Some(true));
        assert_eq!(fuses.get(15), Some(true));
        assert_eq!(record.computed_fuse_checksum, 1 + 1 + 0x80);
    }

    #[test]
    fn test_no_fuse_list() {
        let record = parse(b"\x02QF100*C0000*\x030000\r\n").unwrap();
        assert_eq!(record.fuse_count, 100);
        assert!(record.fuses.is_none());
        assert_eq!(record.computed_fuse_checksum, 0);
    }

    #[test]
    fn test_unknown_tokens_skipped() {
        let buffer = b"\x02N note with QF inside*QF4*V0001 XX01*J1 2*L0 0101*\x030000\r\n";
        let record = parse(buffer).unwrap();
        assert_eq!(record.fuse_count, 4);
        assert_eq!(
            record.fuses.unwrap().to_bools(),
            vec![false, true, false, true]
        );
    }

    #[test]
    fn test_noise_before_first_token() {
        // "Fuse" and "Created" look like F and C tokens without numbers
        let buffer = b"\x02Fuse map*Created by hand*QF2*L0 11*\x030000\r\n";
        let record = parse(buffer).unwrap();
        assert_eq!(record.fuse_count, 2);
        assert_eq!(record.default_fuse, 0);
        assert_eq!(record.declared_fuse_checksum, None);
    }

    #[test]
    fn test_fuse_list_word_before_first_token() {
        // "Lattice" reads as an L token without an offset
        let buffer = b"\x02Lattice GAL*QF2*L0 11*\x030000\r\n";
        let record = parse(buffer).unwrap();
        assert_eq!(record.fuse_count, 2);
        assert_eq!(record.fuses.unwrap().to_bools(), vec![true, true]);

        let buffer = b"\x02QF2*Lattice GAL*L0 11*\x030000\r\n";
        assert_eq!(parse(buffer), Err(JedecError::BadFormat));
    }

    #[test]
    fn test_noise_after_first_token() {
        let buffer = b"\x02QF2*Fuse map*L0 11*\x030000\r\n";
        assert_eq!(parse(buffer), Err(JedecError::BadFormat));

        let buffer = b"\x02QP20*Created by hand*\x030000\r\n";
        assert_eq!(parse(buffer), Err(JedecError::BadFormat));
    }

    #[test]
    fn test_duplicate_tokens() {
        for buffer in [
            &b"\x02QP20*QP20*\x030000\r\n"[..],
            b"\x02QF8*QF8*\x030000\r\n",
            b"\x02F0*F1*\x030000\r\n",
            b"\x02G0*G0*\x030000\r\n",
            b"\x02C0000*C0000*\x030000\r\n",
        ] {
            assert_eq!(parse(buffer), Err(JedecError::BadFormat));
        }
    }

    #[test]
    fn test_fuse_list_ordering() {
        // Before QF
        assert_eq!(
            parse(b"\x02L0000 1010*QF4*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
        // After C
        assert_eq!(
            parse(b"\x02QF4*C0000*L0000 1010*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
    }

    #[test]
    fn test_invalid_fuse_characters() {
        assert_eq!(
            parse(b"\x02QF4*L0000 10x1*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
        assert_eq!(
            parse(b"\x02QF4*L0000 1021*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
    }

    #[test]
    fn test_fuse_list_past_end() {
        assert_eq!(
            parse(b"\x02QF4*L0002 111*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
        assert_eq!(
            parse(b"\x02QF4*L0004 1*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
    }

    #[test]
    fn test_unterminated_fuse_list() {
        assert_eq!(
            parse(b"\x02QF4*L0000 1010\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
    }

    #[test]
    fn test_fuse_checksum_out_of_range() {
        assert_eq!(
            parse(b"\x02QF4*C10000*\x030000\r\n"),
            Err(JedecError::BadFormat)
        );
    }

    #[test]
    fn test_trailing_text_without_delimiter() {
        let record = parse(b"\x02QF4*G1 trailing\r\n\x030000\r\n").unwrap();
        assert_eq!(record.security_flag, 1);
    }

    #[test]
    fn test_file_checksum_reported_not_enforced() {
        let buffer = b"\x02QF1*\x03FFFF\r\n";
        let record = parse(buffer).unwrap();
        let framed = &buffer[..6];

        assert_eq!(record.declared_file_checksum, 0xFFFF);
        assert_eq!(record.computed_file_checksum, crate::file_checksum(framed));
        assert!(!record.file_checksum_matches());
    }
}
