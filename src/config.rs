//! Database configuration.

use crate::storage::buffer::DEFAULT_CAPACITY;

/// Major format version written by `create` and required by `open`.
pub const SUPPORTED_MAJOR_VERSION: u32 = 2;

/// Minor format version written by `create` unless configured otherwise.
pub const DEFAULT_MINOR_VERSION: u32 = 1;

/// Settings applied when creating a database for writing.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Initial capacity of the in-memory buffer in bytes.
    pub initial_capacity: usize,
    /// Major version stored in the header.
    pub version_major: u32,
    /// Minor version stored in the header.
    pub version_minor: u32,
    /// Whether `close_and_flush` syncs the file to disk.
    pub sync_on_flush: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            initial_capacity: DEFAULT_CAPACITY,
            version_major: SUPPORTED_MAJOR_VERSION,
            version_minor: DEFAULT_MINOR_VERSION,
            sync_on_flush: true,
        }
    }
}
