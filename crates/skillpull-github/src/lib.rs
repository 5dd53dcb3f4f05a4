//! `SkillPull` GitHub Transport
//!
//! Downloads repository snapshots from the GitHub REST API and decodes them.
//!
//! ## Features
//!
//! - One request per snapshot via the tarball endpoint (redirects followed)
//! - Optional bearer token, configurable base URL for GitHub Enterprise
//! - Environment fallback for token and base URL

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{tarball_path, GitHubClient};
pub use config::{GitHubConfig, DEFAULT_BASE_URL};
pub use error::FetchError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{FetchError, GitHubClient, GitHubConfig};
}
