pub mod config;
pub mod database;
pub mod query;
pub mod storage;
pub mod tag;

pub use config::DatabaseConfig;
pub use database::{Database, DatabaseHeader, ListBuilder};
pub use query::{find_matching_executable, AttributeProvider, FileAttributes, MatchResult};
pub use storage::{SdbError, SdbResult};
pub use tag::{tag_to_name, Tag, TagId, TagType};
