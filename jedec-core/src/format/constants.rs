//! Format constants for the JEDEC fuse-map text layout

/// Start-of-data marker (ASCII STX)
pub const STX: u8 = 0x02;

/// End-of-data marker (ASCII ETX)
pub const ETX: u8 = 0x03;

/// Token delimiter
pub const DELIMITER: u8 = b'*';

/// Number of hex digits in the trailing file checksum
pub const FILE_CHECKSUM_DIGITS: usize = 4;

/// Fuses emitted per `L` row when writing
pub const DEFAULT_ROW_WIDTH: usize = 40;

/// Device name written when the record carries none
pub const DEFAULT_DEVICE_NAME: &str = "Unknown";

/// Free-form note written in the header block
pub const DEFAULT_NOTE: &str = "Written by the jedec crate";

/// Smallest file accepted by the reader, in bytes
pub const JED_MIN_SIZE: u64 = 64;

/// Largest file accepted by the reader, in bytes (1 MiB)
pub const JED_MAX_SIZE: u64 = 1024 * 1024;

/// Token codes recognized by the parser
pub mod codes {
    /// Pin count
    pub const PIN_COUNT: &[u8] = b"QP";
    /// Fuse count
    pub const FUSE_COUNT: &[u8] = b"QF";
    /// Security flag
    pub const SECURITY: &[u8] = b"G";
    /// Default fuse state
    pub const DEFAULT_FUSE: &[u8] = b"F";
    /// Fuse checksum
    pub const FUSE_CHECKSUM: &[u8] = b"C";
    /// Fuse list
    pub const FUSE_LIST: &[u8] = b"L";
}
