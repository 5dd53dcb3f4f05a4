//! gzip + tar decoding into a [`FileSet`].
//!
//! # Algorithm
//! - Inflate the whole input.
//! - Walk 512-byte header blocks until an all-zero block or until less than
//!   one block remains.
//! - A PAX `x` header sets the path of the next non-PAX entry.
//! - Every non-PAX path goes through [`PrefixStripper`]; regular files with a
//!   non-empty stripped path are copied into the result.
//!
//! # Malformed input
//! - A trailing partial block is treated as padding and ends the walk.
//! - An unparseable size field is [`ArchiveError::CorruptHeader`].
//! - Regular-file or PAX data past the end of the stream is
//!   [`ArchiveError::Truncated`]; content is never shortened.

use std::io::{self, Read};

use flate2::read::MultiGzDecoder;
use skillpull_types::FileSet;
use tracing::{debug, trace};

use crate::error::{ArchiveError, HeaderError, Result};
use crate::header::{is_zero_block, padded_len, TarHeader, BLOCK_LEN};
use crate::pax;
use crate::strip::PrefixStripper;

/// gzip magic bytes (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decode a gzip-compressed tar stream.
pub fn decode(compressed: &[u8]) -> Result<FileSet> {
    let tar = gunzip(compressed)?;
    let files = decode_tar(&tar)?;
    debug!(
        compressed_bytes = compressed.len(),
        tar_bytes = tar.len(),
        files = files.len(),
        "Decoded tarball"
    );
    Ok(files)
}

/// Inflate a complete gzip stream (concatenated members are joined).
pub fn gunzip(compressed: &[u8]) -> Result<Vec<u8>> {
    if !compressed.starts_with(&GZIP_MAGIC) {
        return Err(ArchiveError::Decompression(io::Error::new(
            io::ErrorKind::InvalidData,
            "missing gzip magic bytes",
        )));
    }

    let mut tar = Vec::with_capacity(compressed.len().saturating_mul(4));
    MultiGzDecoder::new(compressed).read_to_end(&mut tar)?;
    Ok(tar)
}

/// Walk an uncompressed tar stream.
pub fn decode_tar(tar: &[u8]) -> Result<FileSet> {
    let mut files = FileSet::new();
    let mut stripper = PrefixStripper::new();
    let mut pax_path: Option<String> = None;
    let mut offset = 0usize;

    loop {
        let Some(block) = offset
            .checked_add(BLOCK_LEN)
            .and_then(|end| tar.get(offset..end))
        else {
            if offset < tar.len() {
                debug!(offset, trailing = tar.len() - offset, "Ignoring partial trailing block");
            }
            break;
        };

        if is_zero_block(block) {
            trace!(offset, "End-of-archive block");
            break;
        }

        let header_offset = offset;
        let header = TarHeader::parse(block).map_err(|source| ArchiveError::CorruptHeader {
            offset: header_offset,
            source,
        })?;
        let size = usize::try_from(header.size).map_err(|_| ArchiveError::CorruptHeader {
            offset: header_offset,
            source: HeaderError::SizeOverflow(header.size),
        })?;
        offset += BLOCK_LEN;

        if header.is_pax() {
            let data = entry_data(tar, offset, size, &header.full_name(), header.size)?;
            pax_path = pax::extract_path(data);
            trace!(offset = header_offset, path = ?pax_path, "PAX extended header");
            offset = offset.saturating_add(padded_len(size));
            continue;
        }

        let name = pax_path.take().unwrap_or_else(|| header.full_name());
        let path = stripper.strip(name.clone());
        trace!(
            offset = header_offset,
            typeflag = header.typeflag,
            size,
            %path,
            "Tar entry"
        );

        if header.is_regular() && !path.is_empty() {
            let content = entry_data(tar, offset, size, &name, header.size)?.to_vec();
            if files.insert(path, content).is_some() {
                trace!(offset = header_offset, "Duplicate path overwritten");
            }
        }

        offset = offset.saturating_add(padded_len(size));
    }

    Ok(files)
}

/// Exactly `size` bytes starting at `offset`; `name` labels the error.
fn entry_data<'a>(
    tar: &'a [u8],
    offset: usize,
    size: usize,
    name: &str,
    declared: u64,
) -> Result<&'a [u8]> {
    offset
        .checked_add(size)
        .and_then(|end| tar.get(offset..end))
        .ok_or_else(|| ArchiveError::Truncated {
            path: name.to_string(),
            declared,
            available: tar.len().saturating_sub(offset),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::header::{TYPE_DIRECTORY, TYPE_PAX, TYPE_PAX_GLOBAL, TYPE_REGULAR};
    use crate::testing::{gzip, pax_record, ustar_header, TarballBuilder};

    fn entries(files: &FileSet) -> Vec<(&str, &[u8])> {
        files.iter().collect()
    }

    #[test]
    fn test_round_trip_flat_archive() {
        let archive = TarballBuilder::new()
            .file("SKILL.md", b"---\nname: a\n---")
            .file("helper.sh", b"#!/bin/sh\necho hi\n")
            .file("empty.txt", b"")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(
            entries(&files),
            vec![
                ("SKILL.md", &b"---\nname: a\n---"[..]),
                ("helper.sh", &b"#!/bin/sh\necho hi\n"[..]),
                ("empty.txt", &b""[..]),
            ]
        );
    }

    #[test]
    fn test_content_spanning_blocks() {
        let big: Vec<u8> = (0..1500u32).map(|i| (i % 251) as u8).collect();
        let archive = TarballBuilder::new()
            .file("big.bin", &big)
            .file("after.txt", b"tail")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(files.get("big.bin"), Some(big.as_slice()));
        assert_eq!(files.get("after.txt"), Some(&b"tail"[..]));
    }

    #[test]
    fn test_strips_snapshot_root() {
        let archive = TarballBuilder::new()
            .global_header("52fdfc072182654f163f5f0f9a621d729566c74d")
            .dir("acme-skills-1a2b3c/")
            .file("acme-skills-1a2b3c/README.md", b"readme")
            .dir("acme-skills-1a2b3c/pdf/")
            .file("acme-skills-1a2b3c/pdf/SKILL.md", b"skill")
            .into_gzip();

        let files = decode(&archive).unwrap();

        let paths: Vec<_> = files.paths().collect();
        assert_eq!(paths, vec!["README.md", "pdf/SKILL.md"]);
    }

    #[test]
    fn test_pax_path_overrides_short_name() {
        let archive = TarballBuilder::new()
            .dir("snapshot/")
            .pax_path("snapshot/long/nested/name.txt")
            .file("snapshot/short", b"payload")
            .file("snapshot/plain.txt", b"x")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(
            entries(&files),
            vec![
                ("long/nested/name.txt", &b"payload"[..]),
                ("plain.txt", &b"x"[..]),
            ]
        );
        assert!(!files.contains("short"));
    }

    #[test]
    fn test_pax_path_can_fix_strip_prefix() {
        let archive = TarballBuilder::new()
            .pax_path("long/nested/name.txt")
            .file("short", b"payload")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(entries(&files), vec![("nested/name.txt", &b"payload"[..])]);
    }

    #[test]
    fn test_pax_override_applies_to_next_entry_only() {
        let archive = TarballBuilder::new()
            .file("root/first", b"1")
            .pax_path("root/renamed")
            .file("root/second", b"2")
            .file("root/third", b"3")
            .into_gzip();

        let files = decode(&archive).unwrap();

        let paths: Vec<_> = files.paths().collect();
        assert_eq!(paths, vec!["first", "renamed", "third"]);
    }

    #[test]
    fn test_pax_path_consumed_by_directory_entry() {
        let archive = TarballBuilder::new()
            .pax_path("root/very/long/dir/")
            .dir("root/short/")
            .file("root/kept.txt", b"k")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(entries(&files), vec![("kept.txt", &b"k"[..])]);
    }

    #[test]
    fn test_pax_header_without_path_clears_override() {
        let archive = TarballBuilder::new()
            .dir("root/")
            .pax_path("root/override.txt")
            .entry("root/PaxHeader", TYPE_PAX, &pax_record("mtime", "1700000000"))
            .file("root/plain.txt", b"p")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(entries(&files), vec![("plain.txt", &b"p"[..])]);
        assert!(!files.contains("override.txt"));
    }

    #[test]
    fn test_zero_block_ends_archive_despite_trailing_bytes() {
        let mut tar = TarballBuilder::new().file("a.txt", b"a").finish();
        tar.extend(ustar_header("ghost.txt", TYPE_REGULAR, 0));
        tar.extend_from_slice(&[0xAB; 700]);

        let files = decode(&gzip(&tar)).unwrap();

        assert_eq!(entries(&files), vec![("a.txt", &b"a"[..])]);
    }

    #[test]
    fn test_missing_end_marker_and_partial_block() {
        let mut tar = TarballBuilder::new().file("a.txt", b"a").into_tar_without_end();
        tar.extend_from_slice(&[7u8; 100]);

        let files = decode_tar(&tar).unwrap();

        assert_eq!(entries(&files), vec![("a.txt", &b"a"[..])]);
    }

    #[test]
    fn test_last_write_wins_on_duplicate_paths() {
        let archive = TarballBuilder::new()
            .file("dup.txt", b"old")
            .file("other.txt", b"o")
            .file("dup.txt", b"new")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(
            entries(&files),
            vec![("dup.txt", &b"new"[..]), ("other.txt", &b"o"[..])]
        );
    }

    #[test]
    fn test_non_regular_entries_are_skipped_by_size() {
        let archive = TarballBuilder::new()
            .entry("link", b'2', b"")
            .entry("weird", b'7', &[1u8; 600])
            .entry("global", TYPE_PAX_GLOBAL, &pax_record("comment", "abc"))
            .file("real.txt", b"r")
            .into_gzip();

        let files = decode(&archive).unwrap();

        assert_eq!(entries(&files), vec![("real.txt", &b"r"[..])]);
    }

    #[test]
    fn test_directory_entries_produce_no_files() {
        let archive = TarballBuilder::new()
            .dir("only/")
            .entry("only/sub/", TYPE_DIRECTORY, b"")
            .into_gzip();

        assert!(decode(&archive).unwrap().is_empty());
    }

    #[test]
    fn test_not_gzip() {
        let err = decode(b"plain text, not gzip").unwrap_err();
        assert!(matches!(err, ArchiveError::Decompression(_)));

        let err = decode(b"").unwrap_err();
        assert!(matches!(err, ArchiveError::Decompression(_)));
    }

    #[test]
    fn test_invalid_size_field() {
        let mut block = ustar_header("bad.txt", TYPE_REGULAR, 0);
        block[124..136].copy_from_slice(b"12z4\0\0\0\0\0\0\0\0");
        let mut tar = TarballBuilder::new().file("ok.txt", b"ok").into_tar_without_end();
        tar.extend_from_slice(&block);

        let err = decode_tar(&tar).unwrap_err();

        match err {
            ArchiveError::CorruptHeader { offset, source } => {
                assert_eq!(offset, 1024);
                assert_eq!(source, HeaderError::InvalidSize("12z4".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_file_data() {
        let mut tar = ustar_header("cut.txt", TYPE_REGULAR, 2048).to_vec();
        tar.extend_from_slice(&[b'x'; 600]);

        let err = decode_tar(&tar).unwrap_err();

        match err {
            ArchiveError::Truncated {
                path,
                declared,
                available,
            } => {
                assert_eq!(path, "cut.txt");
                assert_eq!(declared, 2048);
                assert_eq!(available, 600);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_error_reports_pax_path() {
        let mut tar = TarballBuilder::new()
            .pax_path("root/real/name.txt")
            .into_tar_without_end();
        tar.extend(ustar_header("root/short", TYPE_REGULAR, 2048));
        tar.extend_from_slice(&[b'x'; 600]);

        let err = decode_tar(&tar).unwrap_err();

        match err {
            ArchiveError::Truncated {
                path,
                declared,
                available,
            } => {
                assert_eq!(path, "root/real/name.txt");
                assert_eq!(declared, 2048);
                assert_eq!(available, 600);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
