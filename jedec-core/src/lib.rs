#![no_std]

//! JEDEC Core - Fuse-map format definitions, parser and serializer
//!
//! This crate reads and writes JEDEC fuse-map text without doing any I/O:
//! callers hand it a byte buffer and get a [`JedecRecord`] back, or hand it
//! a record and get the file image back.

extern crate alloc;

pub mod checksum;
pub mod error;
pub mod format;
pub mod fuse_map;
pub mod parser;
pub mod validation;
pub mod writer;

pub use checksum::{file_checksum, fuse_checksum, FuseChecksum};
pub use error::*;
pub use format::constants::{JED_MAX_SIZE, JED_MIN_SIZE};
pub use format::*;
pub use fuse_map::FuseMap;
pub use parser::parse;
pub use validation::{scan_frame, Frame};
pub use writer::{serialize, WriterConfig};
