//! JEDEC checksum computations
//!
//! Two independent 16-bit checksums are defined by the format: a plain byte
//! sum over the framed region of the file, and a fuse checksum where every
//! set fuse `i` contributes `1 << (i mod 8)`.

use crate::fuse_map::FuseMap;

/// Wrapping 16-bit sum of raw bytes
pub fn file_checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)))
}

/// Contribution of a set fuse at `index` to the fuse checksum
pub const fn fuse_weight(index: usize) -> u16 {
    1 << (index & 0x07)
}

/// Running fuse checksum
///
/// Fuses are fed one at a time as they are assigned; only set fuses change
/// the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuseChecksum {
    value: u16,
}

impl FuseChecksum {
    /// Start a new accumulator at zero
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Reset the accumulator to zero
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Account for fuse `index` being assigned `value`
    pub fn update(&mut self, index: usize, value: bool) {
        if value {
            self.value = self.value.wrapping_add(fuse_weight(index));
        }
    }

    /// Current checksum value
    pub const fn value(&self) -> u16 {
        self.value
    }
}

/// Fuse checksum over a whole fuse map
pub fn fuse_checksum(fuses: &FuseMap) -> u16 {
    let mut checksum = FuseChecksum::new();
    for (index, value) in fuses.iter().enumerate() {
        checksum.update(index, value);
    }
    checksum.value()
}
