//! Executable matching against a shim database.
//!
//! File facts that require parsing the executable (version resources, PE
//! header fields) come from an [`AttributeProvider`]; the matcher only walks
//! the database.

pub mod attributes;
pub mod matcher;

pub use attributes::{AttributeProvider, FileAttributes, FsAttributeProvider, VersionField};
pub use matcher::{find_matching_executable, MatchResult};
