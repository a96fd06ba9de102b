//! Human-oriented summary of a parsed JEDEC record

use jedec_core::{JedecRecord, DEFAULT_DEVICE_NAME};

/// Scalar overview of a record, without the fuse bits themselves
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JedecSummary {
    pub device_name: String,
    pub pin_count: u32,
    pub fuse_count: u32,
    pub default_fuse: u32,
    pub security_flag: u32,
    /// Fuses set to 1, `None` when the record has no fuse map
    pub fuses_set: Option<usize>,
    pub declared_fuse_checksum: Option<u16>,
    pub computed_fuse_checksum: u16,
    pub declared_file_checksum: u16,
    pub computed_file_checksum: u16,
    pub file_checksum_matches: bool,
    pub fuse_checksum_matches: Option<bool>,
}

impl JedecSummary {
    /// Summarize a record
    pub fn from_record(record: &JedecRecord) -> Self {
        Self {
            device_name: record
                .device_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            pin_count: record.pin_count,
            fuse_count: record.fuse_count,
            default_fuse: record.default_fuse,
            security_flag: record.security_flag,
            fuses_set: record.fuses.as_ref().map(|fuses| fuses.count_ones()),
            declared_fuse_checksum: record.declared_fuse_checksum,
            computed_fuse_checksum: record.computed_fuse_checksum,
            declared_file_checksum: record.declared_file_checksum,
            computed_file_checksum: record.computed_file_checksum,
            file_checksum_matches: record.file_checksum_matches(),
            fuse_checksum_matches: record.fuse_checksum_matches(),
        }
    }

    /// Encode the summary as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for JedecSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Device: {}", self.device_name)?;
        writeln!(f, "Pins (QP): {}", self.pin_count)?;
        writeln!(f, "Fuses (QF): {}", self.fuse_count)?;
        writeln!(f, "Default fuse (F): {}", self.default_fuse)?;
        writeln!(f, "Security (G): {}", self.security_flag)?;
        match self.fuses_set {
            Some(count) => writeln!(f, "Fuses set: {count}")?,
            None => writeln!(f, "Fuses set: no fuse list")?,
        }
        match self.declared_fuse_checksum {
            Some(declared) => writeln!(
                f,
                "Fuse checksum: declared {declared:04X}, computed {:04X}",
                self.computed_fuse_checksum
            )?,
            None => writeln!(
                f,
                "Fuse checksum: not declared, computed {:04X}",
                self.computed_fuse_checksum
            )?,
        }
        write!(
            f,
            "File checksum: declared {:04X}, computed {:04X}",
            self.declared_file_checksum, self.computed_file_checksum
        )
    }
}
