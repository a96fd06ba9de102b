//! Packed fuse storage
//!
//! A fuse map holds one bit per fuse position. It is allocated once with a
//! fixed length and a fill value, then mutated position by position.

use alloc::vec::Vec;

use crate::error::{JedecError, Result};

/// Fixed-length bit array, one bit per fuse
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PackedFuses"))]
pub struct FuseMap {
    /// Packed bits, fuse `i` lives in byte `i / 8` at bit `i % 8`
    bits: Vec<u8>,
    /// Number of fuses
    len: usize,
}

/// Unchecked wire form of a [`FuseMap`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PackedFuses {
    bits: Vec<u8>,
    len: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<PackedFuses> for FuseMap {
    type Error = JedecError;

    fn try_from(packed: PackedFuses) -> Result<Self> {
        Self::from_packed(packed.bits, packed.len)
    }
}

impl FuseMap {
    /// Allocate a fuse map of `len` fuses, every fuse set to `fill`
    ///
    /// Allocation is fallible: a request the allocator cannot satisfy is
    /// reported as [`JedecError::MemoryExhausted`] instead of aborting.
    pub fn try_new(len: usize, fill: bool) -> Result<Self> {
        let byte_len = len.div_ceil(8);
        let mut bits = Vec::new();
        bits.try_reserve_exact(byte_len)
            .map_err(|_| JedecError::MemoryExhausted)?;
        bits.resize(byte_len, if fill { 0xFF } else { 0x00 });

        let mut map = Self { bits, len };
        map.clear_tail();
        Ok(map)
    }

    /// Build a fuse map from one boolean per fuse
    pub fn from_bools(values: &[bool]) -> Result<Self> {
        let mut map = Self::try_new(values.len(), false)?;
        for (index, &value) in values.iter().enumerate() {
            if value {
                map.bits[index / 8] |= 1 << (index % 8);
            }
        }
        Ok(map)
    }

    /// Adopt packed bytes holding `len` fuses
    ///
    /// Fails with [`JedecError::BadFormat`] unless `bits` is exactly
    /// `len.div_ceil(8)` bytes long. Bits past `len` are cleared.
    pub fn from_packed(bits: Vec<u8>, len: usize) -> Result<Self> {
        if bits.len() != len.div_ceil(8) {
            return Err(JedecError::BadFormat);
        }
        let mut map = Self { bits, len };
        map.clear_tail();
        Ok(map)
    }

    /// Number of fuses
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no fuses
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read a fuse, `None` when out of range
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Write a fuse
    ///
    /// Fails with [`JedecError::BadFormat`] when `index` is past the end; the
    /// map never grows.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        if index >= self.len {
            return Err(JedecError::BadFormat);
        }
        let mask = 1 << (index % 8);
        if value {
            self.bits[index / 8] |= mask;
        } else {
            self.bits[index / 8] &= !mask;
        }
        Ok(())
    }

    /// Number of fuses set to 1
    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Iterate fuse values in position order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| self.bits[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Copy the fuses out as one boolean per position
    pub fn to_bools(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// Packed bytes, least significant bit first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    // Unused bits in the last byte stay zero so equality and popcount only
    // see real fuses.
    fn clear_tail(&mut self) {
        let used = self.len % 8;
        if used != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }
}
