//! Snapshot root-prefix stripping.
//!
//! Repository tarballs wrap every entry in one synthetic directory such as
//! `owner-repo-<sha>/`. The first path containing a `/` fixes that prefix
//! for the rest of the stream.

/// Stateful stripper fed with entry paths in archive order.
#[derive(Debug, Default, Clone)]
pub struct PrefixStripper {
    prefix: Option<String>,
}

impl PrefixStripper {
    /// Stripper with no prefix detected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The detected prefix, including its trailing `/`.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Detect the prefix if still unknown, then remove it from `path`.
    pub fn strip(&mut self, path: String) -> String {
        if self.prefix.is_none() {
            if let Some(slash) = path.find('/') {
                self.prefix = Some(path[..=slash].to_string());
            }
        }

        match &self.prefix {
            Some(prefix) if path.starts_with(prefix.as_str()) => path[prefix.len()..].to_string(),
            _ => path,
        }
    }
}
