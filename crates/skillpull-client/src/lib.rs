//! `SkillPull` Client
//!
//! Pulls Agent Skills out of GitHub repositories and manages the local copies.
//!
//! ## Features
//!
//! - List the skills a repository offers without storing anything
//! - Store all skills of a repository, or one selected by directory name
//! - Read back stored descriptors and files, remove stored skills
//! - Any [`Store`](skillpull_persistence::Store) backend

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod client;
pub mod error;
pub mod paths;

pub use client::{Client, StoreOptions};
pub use error::{Result, SkillsError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Client, SkillsError, StoreOptions};
    pub use skillpull_github::GitHubConfig;
    pub use skillpull_persistence::{FsStore, MemoryStore, Store};
    pub use skillpull_types::Metadata;
}
