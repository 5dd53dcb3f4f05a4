//! PAX extended header records.
//!
//! Records have the form `"<len> <key>=<value>\n"` where `<len>` is the
//! decimal length of the whole record including itself and the newline.

/// Iterator over `(key, value)` pairs of a PAX data block.
///
/// Stops at the first malformed record.
pub struct PaxRecords<'a> {
    rest: &'a [u8],
}

impl<'a> PaxRecords<'a> {
    /// Iterate the records in `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: data }
    }

    fn next_record(&mut self) -> Option<(&'a [u8], &'a [u8])> {
        let rest: &'a [u8] = self.rest;
        let space = rest.iter().position(|&b| b == b' ')?;
        let len: usize = std::str::from_utf8(&rest[..space]).ok()?.parse().ok()?;
        if len <= space + 1 || len > rest.len() {
            return None;
        }

        let record = &rest[space + 1..len];
        self.rest = &rest[len..];

        let record = record.strip_suffix(b"\n").unwrap_or(record);
        let eq = record.iter().position(|&b| b == b'=')?;
        Some((&record[..eq], &record[eq + 1..]))
    }
}

impl<'a> Iterator for PaxRecords<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.next_record();
        if record.is_none() {
            self.rest = &[];
        }
        record
    }
}

/// Value of the first non-empty `path` record, if any.
pub fn extract_path(data: &[u8]) -> Option<String> {
    PaxRecords::new(data)
        .find(|(key, value)| *key == b"path" && !value.is_empty())
        .map(|(_, value)| String::from_utf8_lossy(value).into_owned())
}
