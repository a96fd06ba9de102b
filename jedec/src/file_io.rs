//! File I/O operations for JEDEC files
//!
//! This module opens, size-checks and reads JEDEC files before handing the
//! bytes to the core parser, and writes serialized records back to disk.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use jedec_core::{parse, serialize, JedecRecord, WriterConfig};
#[cfg(feature = "mmap")]
use memmap2::MmapOptions;
use tracing::debug;

use crate::config::ReadConfig;
use crate::error::{Error, Result};

/// Entry points for reading and writing JEDEC files
pub struct JedecFile;

impl JedecFile {
    /// Read and parse a JEDEC file with the default size bounds
    pub fn read<P: AsRef<Path>>(path: P) -> Result<JedecRecord> {
        Self::read_with(path, &ReadConfig::default())
    }

    /// Read and parse a JEDEC file
    ///
    /// The file size is checked against `config` before any content is read.
    pub fn read_with<P: AsRef<Path>>(path: P, config: &ReadConfig) -> Result<JedecRecord> {
        let path = path.as_ref();
        let open_error = |source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        let size = file.metadata().map_err(open_error)?.len();
        config.check_size(size)?;

        let record = if config.use_mmap {
            Self::parse_mapped(&file, path, size)?
        } else {
            let buffer = Self::read_contents(&file, path, size)?;
            parse(&buffer)?
        };

        debug!(
            path = %path.display(),
            size,
            fuse_count = record.fuse_count,
            declared_file_checksum = record.declared_file_checksum,
            computed_file_checksum = record.computed_file_checksum,
            declared_fuse_checksum = ?record.declared_fuse_checksum,
            computed_fuse_checksum = record.computed_fuse_checksum,
            "read JEDEC file"
        );
        Ok(record)
    }

    /// Read and parse JEDEC text from any reader
    ///
    /// At most `config.max_size + 1` bytes are pulled from the reader so an
    /// oversized stream is rejected without buffering all of it. The `size`
    /// of the resulting [`Error::Size`] is then `max_size + 1`, a lower bound
    /// on the stream length.
    pub fn read_from<R: Read>(reader: R, config: &ReadConfig) -> Result<JedecRecord> {
        let mut buffer = Vec::new();
        reader
            .take(config.max_size.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(|source| Error::FileRead {
                path: "<stream>".into(),
                source,
            })?;
        parse_bytes(&buffer, config)
    }

    /// Serialize a record and write it with the default layout
    pub fn write<P: AsRef<Path>>(path: P, record: &JedecRecord) -> Result<()> {
        Self::write_with(path, record, &WriterConfig::default())
    }

    /// Serialize a record and write it to `path`, replacing any existing file
    pub fn write_with<P: AsRef<Path>>(
        path: P,
        record: &JedecRecord,
        config: &WriterConfig,
    ) -> Result<()> {
        let path = path.as_ref();
        let bytes = serialize(record, config)?;

        let mut file = File::create(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let write_error = |source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        };
        file.write_all(&bytes).map_err(write_error)?;
        file.flush().map_err(write_error)?;

        debug!(
            path = %path.display(),
            size = bytes.len(),
            fuse_count = record.fuse_count,
            "wrote JEDEC file"
        );
        Ok(())
    }

    /// Serialize a record into any writer
    pub fn write_to<W: Write>(
        mut writer: W,
        record: &JedecRecord,
        config: &WriterConfig,
    ) -> Result<()> {
        let bytes = serialize(record, config)?;
        let write_error = |source| Error::FileWrite {
            path: "<stream>".into(),
            source,
        };
        writer.write_all(&bytes).map_err(write_error)?;
        writer.flush().map_err(write_error)
    }

    fn read_contents<R: Read>(mut reader: R, path: &Path, size: u64) -> Result<Vec<u8>> {
        let read_error = |source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        };

        let capacity = usize::try_from(size).map_err(|_| Error::MemoryExhausted)?;
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| Error::MemoryExhausted)?;
        reader.read_to_end(&mut buffer).map_err(read_error)?;

        // A file that changed size between stat and read is a short read
        if buffer.len() as u64 != size {
            return Err(read_error(std::io::ErrorKind::UnexpectedEof.into()));
        }
        Ok(buffer)
    }

    #[cfg(feature = "mmap")]
    fn parse_mapped(file: &File, path: &Path, _size: u64) -> Result<JedecRecord> {
        // SAFETY: read-only mapping, dropped before this function returns
        let mmap = unsafe {
            MmapOptions::new().map(file).map_err(|source| Error::FileRead {
                path: path.to_path_buf(),
                source,
            })?
        };
        Ok(parse(&mmap)?)
    }

    #[cfg(not(feature = "mmap"))]
    fn parse_mapped(file: &File, path: &Path, size: u64) -> Result<JedecRecord> {
        let buffer = Self::read_contents(file, path, size)?;
        Ok(parse(&buffer)?)
    }
}

/// Parse an in-memory JEDEC image, applying the size bounds of `config`
pub fn parse_bytes(buffer: &[u8], config: &ReadConfig) -> Result<JedecRecord> {
    config.check_size(buffer.len() as u64)?;
    Ok(parse(buffer)?)
}
