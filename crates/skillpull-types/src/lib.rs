//! SkillPull Types - Core types shared by the SkillPull crates
//!
//! This module defines the data passed between the archive decoder, skill
//! discovery, the frontmatter parser and the storage layer.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod file_set;

use serde::{Deserialize, Serialize};

pub use file_set::FileSet;

/// File name of the skill descriptor inside a skill directory
pub const SKILL_MD: &str = "SKILL.md";

/// A skill found inside a decoded repository snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSkill {
    /// Directory containing the descriptor, or "." for the archive root
    pub path: String,
    /// Short identifier derived from the last segment of `path`
    pub directory_name: String,
    /// Raw `SKILL.md` bytes, unparsed
    pub skill_md: Vec<u8>,
    /// Files inside the skill directory keyed by skill-relative path
    pub files: FileSet,
}

impl DiscoveredSkill {
    /// True when the descriptor sits at the archive root
    pub fn is_root(&self) -> bool {
        self.path == "."
    }
}

/// The frontmatter of a SKILL.md
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Skill identifier
    pub name: String,
    /// What the skill does and when to use it
    pub description: String,
    /// License name or reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Environment requirements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<String>,
    /// Pre-approved tools the skill may use
    #[serde(
        rename = "allowed-tools",
        alias = "allowedTools",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_tools: Option<Vec<String>>,
    /// Free-form key/value metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Metadata {
    /// Metadata with only the required fields set
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            license: None,
            compatibility: None,
            allowed_tools: None,
            metadata: None,
        }
    }

    /// Generate a concise one-line summary
    /// Format: "- {name}: {description}"
    pub fn to_summary(&self) -> String {
        format!("- {}: {}", self.name, self.description)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serializes_skill_md_keys() {
        let mut metadata = Metadata::new("pdf", "Work with PDFs");
        metadata.allowed_tools = Some(vec!["bash".to_string()]);

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["allowed-tools"][0], "bash");
        assert!(json.get("license").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_metadata_summary() {
        let metadata = Metadata::new("pdf", "Work with PDFs");
        assert_eq!(metadata.to_summary(), "- pdf: Work with PDFs");
    }
}
