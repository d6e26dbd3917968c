//! Storage layer for shim databases.
//!
//! - **ByteStore**: growable in-memory image with checked reads and appends
//! - **DatabaseFile**: the backing file, read whole on open and rewritten on
//!   flush
//! - **SdbError**: error type shared by the whole engine

pub mod buffer;
pub mod disk;
pub mod error;

pub use buffer::ByteStore;
pub use disk::DatabaseFile;
pub use error::{SdbError, SdbResult};
