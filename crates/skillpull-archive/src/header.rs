//! Fixed-offset ustar header parsing.
//!
//! # Invariants
//! - Parsing is a pure function of one 512-byte block.
//! - Only `name`, `size`, `typeflag` and `prefix` are read; checksum, mode,
//!   owner and link fields are ignored.

use crate::error::HeaderError;

/// Size of a tar block; headers and data are aligned to it.
pub const BLOCK_LEN: usize = 512;

const NAME_OFFSET: usize = 0;
const NAME_LEN: usize = 100;
const SIZE_OFFSET: usize = 124;
const SIZE_LEN: usize = 12;
const TYPEFLAG_OFFSET: usize = 156;
const PREFIX_OFFSET: usize = 345;
const PREFIX_LEN: usize = 155;

/// Regular file typeflag.
pub const TYPE_REGULAR: u8 = b'0';
/// Pre-POSIX regular file typeflag.
pub const TYPE_REGULAR_LEGACY: u8 = 0;
/// Directory typeflag.
pub const TYPE_DIRECTORY: u8 = b'5';
/// PAX extended header for the next entry.
pub const TYPE_PAX: u8 = b'x';
/// PAX global extended header.
pub const TYPE_PAX_GLOBAL: u8 = b'g';

/// The header fields the decoder cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarHeader {
    /// Short name field (up to 100 bytes)
    pub name: String,
    /// Ustar prefix field (up to 155 bytes)
    pub prefix: String,
    /// Declared data size in bytes
    pub size: u64,
    /// Entry type
    pub typeflag: u8,
}

impl TarHeader {
    /// Parse one header block.
    pub fn parse(block: &[u8]) -> Result<Self, HeaderError> {
        if block.len() != BLOCK_LEN {
            return Err(HeaderError::ShortBlock(block.len()));
        }

        Ok(Self {
            name: read_string(&block[NAME_OFFSET..NAME_OFFSET + NAME_LEN]),
            prefix: read_string(&block[PREFIX_OFFSET..PREFIX_OFFSET + PREFIX_LEN]),
            size: parse_octal(&block[SIZE_OFFSET..SIZE_OFFSET + SIZE_LEN])?,
            typeflag: block[TYPEFLAG_OFFSET],
        })
    }

    /// `prefix/name`, or just `name` when the prefix is empty.
    pub fn full_name(&self) -> String {
        if self.prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.prefix, self.name)
        }
    }

    /// Regular files carry `'0'` or, in old archives, NUL.
    #[inline]
    pub fn is_regular(&self) -> bool {
        self.typeflag == TYPE_REGULAR || self.typeflag == TYPE_REGULAR_LEGACY
    }

    /// Per-entry PAX extended header.
    #[inline]
    pub fn is_pax(&self) -> bool {
        self.typeflag == TYPE_PAX
    }
}

/// True for the all-zero end-of-archive block.
#[inline]
pub fn is_zero_block(block: &[u8]) -> bool {
    block.iter().all(|&b| b == 0)
}

/// Bytes occupied by `size` bytes of data once padded to the block boundary.
#[inline]
pub fn padded_len(size: usize) -> usize {
    size.div_ceil(BLOCK_LEN).saturating_mul(BLOCK_LEN)
}

/// Parse a zero-padded octal field.
///
/// Leading/trailing whitespace and NUL padding are ignored; a blank field is 0.
pub fn parse_octal(field: &[u8]) -> Result<u64, HeaderError> {
    let start = field
        .iter()
        .position(|&b| b != 0 && !b.is_ascii_whitespace())
        .unwrap_or(field.len());
    let field = &field[start..];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let digits = field[..end].trim_ascii_end();

    if digits.is_empty() {
        return Ok(0);
    }

    let invalid = || HeaderError::InvalidSize(String::from_utf8_lossy(digits).into_owned());
    if !digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return Err(invalid());
    }
    let text = std::str::from_utf8(digits).map_err(|_| invalid())?;
    u64::from_str_radix(text, 8).map_err(|_| invalid())
}

/// NUL-terminated field decoded as UTF-8 (lossy).
fn read_string(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
