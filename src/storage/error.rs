//! Error types for the shim database engine.

use thiserror::Error;

use crate::tag::{Tag, TagType};

/// Errors that can occur while reading or writing a shim database.
#[derive(Error, Debug)]
pub enum SdbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid database format: {0}")]
    Format(String),

    #[error("Type mismatch: tag {tag} is not of type {expected:?}")]
    TypeMismatch { tag: Tag, expected: TagType },

    #[error("Out of range: {length} bytes at offset {offset} (size: {size})")]
    OutOfRange { offset: u32, length: u32, size: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Buffer too small: requires {required} bytes but only {available} available")]
    BufferTooSmall { required: usize, available: usize },
}

/// Result type for shim database operations.
pub type SdbResult<T> = Result<T, SdbError>;
