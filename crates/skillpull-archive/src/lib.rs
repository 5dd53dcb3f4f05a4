//! `SkillPull` Archive Decoder
//!
//! Decodes the gzip-compressed tar snapshots served by repository tarball
//! endpoints into an ordered path → content mapping.
//!
//! ## Features
//!
//! - Fixed-offset ustar header parsing, no general-purpose archive library
//! - PAX `path` overrides for the entry that follows an `x` header
//! - Dynamic stripping of the snapshot's synthetic top-level directory
//! - Last-write-wins for duplicate paths
//!
//! Checksums, sparse files, hard links, GNU longnames and multi-volume
//! archives are not supported.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod decode;
pub mod error;
pub mod header;
pub mod pax;
pub mod strip;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use decode::{decode, decode_tar, gunzip};
pub use error::{ArchiveError, HeaderError, Result};
pub use header::TarHeader;
pub use strip::PrefixStripper;
