//! `SkillPull` Skills
//!
//! Turns a decoded repository snapshot into skills.
//!
//! ## Features
//!
//! - Discovery: locate every SKILL.md and bucket the other files under their
//!   skill directory
//! - Directory naming: short identifier for each discovered skill
//! - YAML frontmatter parsing into [`Metadata`](skillpull_types::Metadata)

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod discovery;
pub mod error;
pub mod parser;

pub use discovery::{directory_name, discover_skills};
pub use error::ParseError;
pub use parser::parse_skill_md;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{directory_name, discover_skills, parse_skill_md, ParseError};
}
