//! In-memory representation of a JEDEC file

use alloc::string::String;

use crate::fuse_map::FuseMap;

/// Contents of a JEDEC file
///
/// Built by [`crate::parse`] or assembled by hand and handed to
/// [`crate::serialize`]. Scalar fields that the file does not declare stay
/// at zero, matching what the writer emits for them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JedecRecord {
    /// Display label written in the header block
    pub device_name: Option<String>,
    /// Pin count (`QP`)
    pub pin_count: u32,
    /// Number of fuses (`QF`)
    pub fuse_count: u32,
    /// Default fuse state (`F`), nonzero means fuses start out set
    pub default_fuse: u32,
    /// Security fuse (`G`)
    pub security_flag: u32,
    /// Fuse checksum declared by the `C` token
    pub declared_fuse_checksum: Option<u16>,
    /// Fuse states, present once a fuse list has been read or supplied
    pub fuses: Option<FuseMap>,
    /// Checksum written after the end-of-data marker
    pub declared_file_checksum: u16,
    /// Byte sum of the framed region
    pub computed_file_checksum: u16,
    /// Checksum of the fuses assigned by fuse lists
    pub computed_fuse_checksum: u16,
}

impl JedecRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device name
    pub fn with_device_name(mut self, name: impl Into<String>) -> Self {
        self.device_name = Some(name.into());
        self
    }

    /// Set the pin count
    pub fn with_pin_count(mut self, pin_count: u32) -> Self {
        self.pin_count = pin_count;
        self
    }

    /// Set the default fuse state
    pub fn with_default_fuse(mut self, default_fuse: u32) -> Self {
        self.default_fuse = default_fuse;
        self
    }

    /// Set the security flag
    pub fn with_security_flag(mut self, security_flag: u32) -> Self {
        self.security_flag = security_flag;
        self
    }

    /// Attach a fuse map and set the fuse count to match it
    ///
    /// Fails when the map is too long for the 32-bit `QF` field.
    pub fn with_fuses(mut self, fuses: FuseMap) -> crate::Result<Self> {
        self.fuse_count =
            u32::try_from(fuses.len()).map_err(|_| crate::JedecError::BadFormat)?;
        self.fuses = Some(fuses);
        Ok(self)
    }

    /// Read a single fuse, `None` when no fuse map is present or out of range
    pub fn fuse(&self, index: usize) -> Option<bool> {
        self.fuses.as_ref().and_then(|fuses| fuses.get(index))
    }

    /// Whether the declared file checksum equals the computed one
    ///
    /// Nothing in this crate acts on a mismatch; callers decide what it means.
    pub fn file_checksum_matches(&self) -> bool {
        self.declared_file_checksum == self.computed_file_checksum
    }

    /// Whether the `C` token, if present, equals the computed fuse checksum
    pub fn fuse_checksum_matches(&self) -> Option<bool> {
        self.declared_fuse_checksum
            .map(|declared| declared == self.computed_fuse_checksum)
    }
}
