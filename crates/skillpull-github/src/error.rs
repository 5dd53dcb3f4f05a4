//! Error types for GitHub fetches

use skillpull_archive::ArchiveError;
use thiserror::Error;

/// GitHub fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with an HTTP error status
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// `GitHub API error: <code> <reason> for <path>`
        message: String,
    },

    /// Transport-level error (connection, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Snapshot could not be decoded
    #[error("Invalid tarball: {0}")]
    Archive(#[from] ArchiveError),
}

impl FetchError {
    /// HTTP status code, when the server answered with one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Archive(_) => None,
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, FetchError>;
