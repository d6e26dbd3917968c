use std::path::Path;

use super::attributes::{AttributeProvider, FileAttributes, FsAttributeProvider};
use crate::database::Database;
use crate::storage::error::{SdbError, SdbResult};
use crate::tag::catalog::{TAG_DATABASE, TAG_EXE, TAG_MATCHING_FILE, TAG_NAME};
use crate::tag::TagId;

/// An `EXE` entry that matched a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The `DATABASE` list containing the entry.
    pub database: TagId,
    /// The matching `EXE` list.
    pub exe: TagId,
    /// Attributes collected for the matched file.
    pub attributes: FileAttributes,
}

/// Find the first `EXE` entry describing the file at `path`.
///
/// An entry matches when its `NAME` equals the file name of `path` (exact
/// comparison) and every `MATCHING_FILE` child names a file present in the
/// same directory. Entries are tried in document order.
pub fn find_matching_executable(
    db: &Database,
    path: &Path,
    provider: &dyn AttributeProvider,
) -> SdbResult<MatchResult> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| SdbError::NotFound(format!("file name in {:?}", path)))?;
    let directory = path.parent().unwrap_or_else(|| Path::new(""));

    let attributes = provider.attributes(path).unwrap_or_else(|e| {
        log::warn!("failed to read attributes of {:?}: {}", path, e);
        FileAttributes::default()
    });

    let database = db
        .find_first_tag(TagId::ROOT, TAG_DATABASE)
        .ok_or_else(|| SdbError::NotFound("DATABASE list".to_string()))?;

    let mut current = db.find_first_tag(database, TAG_EXE);
    while let Some(exe) = current {
        if entry_matches(db, exe, file_name, directory, provider) {
            log::debug!("{:?} matched EXE entry at {}", path, exe);
            return Ok(MatchResult {
                database,
                exe,
                attributes,
            });
        }
        current = db.find_next_tag(database, exe);
    }

    Err(SdbError::NotFound(format!("EXE entry matching {:?}", path)))
}

fn entry_matches(
    db: &Database,
    exe: TagId,
    file_name: &str,
    directory: &Path,
    provider: &dyn AttributeProvider,
) -> bool {
    if entry_name(db, exe).as_deref() != Some(file_name) {
        return false;
    }

    let mut current = db.find_first_tag(exe, TAG_MATCHING_FILE);
    while let Some(matching_file) = current {
        match entry_name(db, matching_file) {
            Some(name) if provider.exists(&directory.join(&name)) => {}
            Some(name) => {
                log::trace!("matching file {:?} missing for entry {}", name, exe);
                return false;
            }
            None => {
                log::trace!("matching file at {} has no name", matching_file);
                return false;
            }
        }
        current = db.find_next_tag(exe, matching_file);
    }
    true
}

fn entry_name(db: &Database, list: TagId) -> Option<String> {
    db.find_first_tag(list, TAG_NAME)
        .and_then(|name| db.string_tag(name))
}

impl Database {
    /// [`find_matching_executable`] against the local filesystem.
    pub fn find_matching_executable(&self, path: &Path) -> SdbResult<MatchResult> {
        find_matching_executable(self, path, &FsAttributeProvider)
    }
}
