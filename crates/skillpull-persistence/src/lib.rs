//! `SkillPull` Persistence
//!
//! Byte-oriented storage for pulled skills, addressed by `/`-separated paths.
//!
//! ## Backends
//!
//! - [`FsStore`]: the local filesystem via `tokio::fs`
//! - [`MemoryStore`]: an in-process map, used by tests and embedders

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod error;
pub mod fs;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use fs::FsStore;
pub use memory::MemoryStore;
pub use store::Store;
