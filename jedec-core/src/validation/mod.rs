//! Structural validation for JEDEC buffers
//!
//! Pure functions over byte slices with no I/O dependencies.

pub mod framing;
pub mod parsing;

pub use framing::{scan_frame, Frame};
pub use parsing::{scan_decimal, scan_hex, Scanned};
