//! Reader configuration

use jedec_core::{JED_MAX_SIZE, JED_MIN_SIZE};

/// Settings applied when reading JEDEC files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadConfig {
    /// Smallest accepted input in bytes
    pub min_size: u64,
    /// Largest accepted input in bytes
    pub max_size: u64,
    /// Map the file into memory instead of reading it into a buffer
    pub use_mmap: bool,
}

impl ReadConfig {
    /// Set the accepted size range, both ends inclusive
    pub fn with_size_bounds(mut self, min_size: u64, max_size: u64) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Read through a memory map (needs the `mmap` feature, ignored otherwise)
    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Whether `size` falls inside the accepted range
    pub fn accepts_size(&self, size: u64) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }

    pub(crate) fn check_size(&self, size: u64) -> crate::Result<()> {
        if !self.accepts_size(size) {
            return Err(crate::Error::Size {
                size,
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            min_size: JED_MIN_SIZE,
            max_size: JED_MAX_SIZE,
            use_mmap: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = ReadConfig::default();
        assert!(!config.accepts_size(JED_MIN_SIZE - 1));
        assert!(config.accepts_size(JED_MIN_SIZE));
        assert!(config.accepts_size(JED_MAX_SIZE));
        assert!(!config.accepts_size(JED_MAX_SIZE + 1));
    }

    #[test]
    fn test_check_size_error() {
        let config = ReadConfig::default().with_size_bounds(10, 20);
        assert!(config.check_size(15).is_ok());
        assert!(matches!(
            config.check_size(21),
            Err(crate::Error::Size { size: 21, min: 10, max: 20 })
        ));
    }
}
