//! Insertion-ordered path → content mapping
//!
//! Keeps an explicit ordered list of entries next to a hash index so that
//! iteration follows insertion order. Re-inserting a path replaces its
//! content in place; the entry keeps its original position.

use std::collections::HashMap;

/// Ordered mapping from relative path to owned file content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    entries: Vec<(String, Vec<u8>)>,
    index: HashMap<String, usize>,
}

impl FileSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `path`, returning the previous content if any
    pub fn insert(&mut self, path: impl Into<String>, content: Vec<u8>) -> Option<Vec<u8>> {
        let path = path.into();
        if let Some(&slot) = self.index.get(&path) {
            return Some(std::mem::replace(&mut self.entries[slot].1, content));
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, content));
        None
    }

    /// Content stored at `path`
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.index
            .get(path)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// True when `path` has an entry
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were inserted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_slice()))
    }

    /// Iterate paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }
}

impl<P: Into<String>> FromIterator<(P, Vec<u8>)> for FileSet {
    fn from_iter<I: IntoIterator<Item = (P, Vec<u8>)>>(iter: I) -> Self {
        let mut files = FileSet::new();
        for (path, content) in iter {
            files.insert(path, content);
        }
        files
    }
}

impl IntoIterator for FileSet {
    type Item = (String, Vec<u8>);
    type IntoIter = std::vec::IntoIter<(String, Vec<u8>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_follows_insertion_order() {
        let files: FileSet = [("b", b"1".to_vec()), ("a", b"2".to_vec()), ("c", b"3".to_vec())]
            .into_iter()
            .collect();

        let paths: Vec<_> = files.paths().collect();
        assert_eq!(paths, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut files = FileSet::new();
        files.insert("first", b"old".to_vec());
        files.insert("second", b"x".to_vec());

        let previous = files.insert("first", b"new".to_vec());

        assert_eq!(previous, Some(b"old".to_vec()));
        assert_eq!(files.len(), 2);
        assert_eq!(files.get("first"), Some(&b"new"[..]));
        assert_eq!(files.paths().next(), Some("first"));
    }

    #[test]
    fn test_missing_path() {
        let files = FileSet::new();
        assert!(files.is_empty());
        assert!(files.get("nope").is_none());
        assert!(!files.contains("nope"));
    }
}
