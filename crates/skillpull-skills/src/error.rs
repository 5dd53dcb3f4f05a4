//! Error types for SKILL.md parsing

use thiserror::Error;

/// SKILL.md parse errors
#[derive(Debug, Error)]
pub enum ParseError {
    /// Frontmatter is not valid YAML
    #[error("Failed to parse YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Frontmatter parsed to something other than a mapping
    #[error("SKILL.md frontmatter must be a mapping")]
    NotAMapping,

    /// Required field absent, empty or not a string
    #[error("SKILL.md frontmatter must include a \"{0}\" field")]
    MissingField(&'static str),

    /// Optional field present with the wrong shape
    #[error("\"{field}\" must be {expected}")]
    InvalidField {
        /// Frontmatter key
        field: &'static str,
        /// Expected shape
        expected: &'static str,
    },

    /// Frontmatter pattern failed to compile
    #[error("Failed to compile regex: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ParseError>;
