//! Error types for client operations

use skillpull_github::FetchError;
use skillpull_persistence::StoreError;
use skillpull_skills::ParseError;
use thiserror::Error;

/// Client errors
#[derive(Debug, Error)]
pub enum SkillsError {
    /// A SKILL.md could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The repository could not be fetched or decoded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No discovered skill has the requested directory name
    #[error("Skill \"{0}\" not found")]
    SkillNotFound(String),

    /// Stored or fetched text is not UTF-8
    #[error("{path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// Offending path
        path: String,
        /// Cause
        #[source]
        source: std::str::Utf8Error,
    },

    /// A skill name or file path would escape its skill directory
    #[error("Unsafe path: {0:?}")]
    UnsafePath(String),
}

impl SkillsError {
    /// HTTP status of a failed fetch, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status(),
            _ => None,
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, SkillsError>;
