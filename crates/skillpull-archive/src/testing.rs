//! Tarball fixtures for tests.
//!
//! Writes real ustar headers (with checksums) so fixtures also open in
//! standard tools. Panics on paths that cannot fit the name/prefix fields.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::header::{BLOCK_LEN, TYPE_DIRECTORY, TYPE_PAX, TYPE_PAX_GLOBAL, TYPE_REGULAR};

/// Builder for in-memory tar / tar.gz archives.
#[derive(Debug, Default)]
pub struct TarballBuilder {
    tar: Vec<u8>,
}

impl TarballBuilder {
    /// Empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a regular file.
    #[must_use]
    pub fn file(self, path: &str, content: &[u8]) -> Self {
        self.entry(path, TYPE_REGULAR, content)
    }

    /// Append a directory entry.
    #[must_use]
    pub fn dir(self, path: &str) -> Self {
        self.entry(path, TYPE_DIRECTORY, &[])
    }

    /// Append a PAX `x` header carrying `path` for the next entry.
    #[must_use]
    pub fn pax_path(self, path: &str) -> Self {
        self.entry("PaxHeader", TYPE_PAX, &pax_record("path", path))
    }

    /// Append a PAX global header with a `comment` record, as repository
    /// tarballs do for the commit id.
    #[must_use]
    pub fn global_header(self, comment: &str) -> Self {
        self.entry("pax_global_header", TYPE_PAX_GLOBAL, &pax_record("comment", comment))
    }

    /// Append an entry of any type with block-padded data.
    #[must_use]
    pub fn entry(mut self, path: &str, typeflag: u8, content: &[u8]) -> Self {
        self.tar.extend_from_slice(&ustar_header(path, typeflag, content.len() as u64));
        self.tar.extend_from_slice(content);
        pad_to_block(&mut self.tar);
        self
    }

    /// The tar bytes without the end-of-archive marker.
    pub fn into_tar_without_end(self) -> Vec<u8> {
        self.tar
    }

    /// The tar bytes followed by two zero blocks.
    pub fn finish(mut self) -> Vec<u8> {
        self.tar.resize(self.tar.len() + 2 * BLOCK_LEN, 0);
        self.tar
    }

    /// The finished archive, gzip-compressed.
    pub fn into_gzip(self) -> Vec<u8> {
        gzip(&self.finish())
    }
}

/// gzip-compress `data`.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("write to Vec");
    encoder.finish().expect("finish gzip stream")
}

/// One PAX record, `"<len> key=value\n"`.
pub fn pax_record(key: &str, value: &str) -> Vec<u8> {
    let body = format!(" {key}={value}\n");
    let mut len = body.len() + 1;
    while len.to_string().len() + body.len() != len {
        len += 1;
    }
    format!("{len}{body}").into_bytes()
}

/// A ustar header block, splitting long paths into prefix + name.
pub fn ustar_header(path: &str, typeflag: u8, size: u64) -> [u8; BLOCK_LEN] {
    let (prefix, name) = split_path(path);
    let mut block = [0u8; BLOCK_LEN];

    put(&mut block, 0, name.as_bytes());
    put(&mut block, 100, b"0000644\0");
    put(&mut block, 108, b"0000000\0");
    put(&mut block, 116, b"0000000\0");
    put(&mut block, 124, format!("{size:011o}\0").as_bytes());
    put(&mut block, 136, b"14536111140\0");
    block[156] = typeflag;
    put(&mut block, 257, b"ustar\0");
    put(&mut block, 263, b"00");
    put(&mut block, 265, b"skillpull");
    put(&mut block, 297, b"skillpull");
    put(&mut block, 345, prefix.as_bytes());

    // checksum is computed with its own field as spaces
    put(&mut block, 148, b"        ");
    let sum: u32 = block.iter().map(|&b| u32::from(b)).sum();
    put(&mut block, 148, format!("{sum:06o}\0 ").as_bytes());

    block
}

fn split_path(path: &str) -> (&str, &str) {
    if path.len() <= 100 {
        return ("", path);
    }
    path.char_indices()
        .filter(|&(_, c)| c == '/')
        .map(|(i, _)| (&path[..i], &path[i + 1..]))
        .find(|(prefix, name)| prefix.len() <= 155 && !name.is_empty() && name.len() <= 100)
        .expect("path does not fit ustar name/prefix fields")
}

fn put(block: &mut [u8; BLOCK_LEN], offset: usize, bytes: &[u8]) {
    block[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn pad_to_block(tar: &mut Vec<u8>) {
    let rem = tar.len() % BLOCK_LEN;
    if rem != 0 {
        tar.resize(tar.len() + BLOCK_LEN - rem, 0);
    }
}
