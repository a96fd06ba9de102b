//! JEDEC - Fuse-map file reading and writing
//!
//! This library reads and writes JEDEC fuse-map files (`.jed`), the text
//! format device programmers use to describe the fuse pattern of PLDs/GALs.
//!
//! ## Architecture
//!
//! The workspace follows a specification/implementation separation:
//!
//! - **jedec-core**: format definitions, parser, serializer and checksums (no I/O)
//! - **jedec**: file access, size limits, memory mapping and error reporting
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jedec::{FuseMap, JedecFile, JedecRecord};
//!
//! fn example() -> jedec::Result<()> {
//!     let record = JedecFile::read("design.jed")?;
//!     println!("{} fuses, checksum {:04X}", record.fuse_count, record.computed_fuse_checksum);
//!
//!     let fuses = FuseMap::try_new(132, false)?;
//!     let copy = JedecRecord::new()
//!         .with_device_name("GAL16V8")
//!         .with_pin_count(20)
//!         .with_fuses(fuses)?;
//!     JedecFile::write("copy.jed", &copy)?;
//!     Ok(())
//! }
//! ```
//!
//! Declared checksums are parsed and reported next to the computed ones;
//! nothing here rejects a file because they differ.

// Re-export core format definitions
pub use jedec_core::{
    // Format definitions
    FuseMap, JedecRecord, WriterConfig, DEFAULT_ROW_WIDTH, JED_MAX_SIZE, JED_MIN_SIZE,
    // Error handling
    JedecError,
    // Checksums
    file_checksum, fuse_checksum,
    // Pure codec entry points
    parse, serialize,
};

pub mod config;
pub mod error;
pub mod file_io;
pub mod summary;

pub use config::ReadConfig;
pub use error::{Error, Result};
pub use file_io::{parse_bytes, JedecFile};
pub use summary::JedecSummary;
