//! JEDEC file format definitions
//!
//! This module contains the data structures and constants describing the
//! JEDEC fuse-map text format. No I/O operations.

pub mod constants;
pub mod record;

pub use constants::{DEFAULT_DEVICE_NAME, DEFAULT_ROW_WIDTH, DELIMITER, ETX, STX};
pub use record::JedecRecord;
