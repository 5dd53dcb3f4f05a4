//! Error types for archive decoding

use thiserror::Error;

/// A tar header block that cannot be interpreted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Header slice is not exactly one block long
    #[error("header block is {0} bytes, expected 512")]
    ShortBlock(usize),

    /// Size field holds something other than octal digits
    #[error("invalid octal size field {0:?}")]
    InvalidSize(String),

    /// Size does not fit in memory on this platform
    #[error("entry size {0} exceeds addressable memory")]
    SizeOverflow(u64),
}

/// Archive decoding errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Input is not a valid gzip stream
    #[error("gzip decompression failed: {0}")]
    Decompression(#[from] std::io::Error),

    /// Header block at `offset` of the inflated stream is malformed
    #[error("corrupt tar header at offset {offset}: {source}")]
    CorruptHeader {
        /// Byte offset of the header block
        offset: usize,
        /// What was wrong with it
        #[source]
        source: HeaderError,
    },

    /// Entry data runs past the end of the stream
    #[error("entry '{path}' declares {declared} bytes but only {available} remain")]
    Truncated {
        /// Entry path in the archive, after any PAX override
        path: String,
        /// Size declared by the header
        declared: u64,
        /// Bytes left in the stream
        available: usize,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ArchiveError>;
