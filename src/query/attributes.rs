use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::storage::error::SdbResult;

/// Version-resource string fields of an executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionField {
    CompanyName,
    FileDescription,
    FileVersion,
    InternalName,
    LegalCopyright,
    OriginalFilename,
    ProductName,
    ProductVersion,
}

impl VersionField {
    pub const ALL: [VersionField; 8] = [
        VersionField::CompanyName,
        VersionField::FileDescription,
        VersionField::FileVersion,
        VersionField::InternalName,
        VersionField::LegalCopyright,
        VersionField::OriginalFilename,
        VersionField::ProductName,
        VersionField::ProductVersion,
    ];

    /// Key of the field in a `StringFileInfo` block.
    pub fn key(self) -> &'static str {
        match self {
            VersionField::CompanyName => "CompanyName",
            VersionField::FileDescription => "FileDescription",
            VersionField::FileVersion => "FileVersion",
            VersionField::InternalName => "InternalName",
            VersionField::LegalCopyright => "LegalCopyright",
            VersionField::OriginalFilename => "OriginalFilename",
            VersionField::ProductName => "ProductName",
            VersionField::ProductVersion => "ProductVersion",
        }
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Attributes of a file being matched. Fields the provider could not
/// determine are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAttributes {
    pub size: Option<u64>,
    pub version_strings: HashMap<VersionField, String>,
    pub pe_checksum: Option<u32>,
    pub link_date: Option<u32>,
}

impl FileAttributes {
    pub fn version_string(&self, field: VersionField) -> Option<&str> {
        self.version_strings.get(&field).map(String::as_str)
    }
}

/// Source of file facts used by the matcher.
pub trait AttributeProvider {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Collect the attributes of the file at `path`.
    fn attributes(&self, path: &Path) -> SdbResult<FileAttributes>;
}

/// Provider backed by the local filesystem.
///
/// Reports only what file metadata can tell; executable headers are not
/// parsed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsAttributeProvider;

impl AttributeProvider for FsAttributeProvider {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn attributes(&self, path: &Path) -> SdbResult<FileAttributes> {
        let metadata = fs::metadata(path)?;
        Ok(FileAttributes {
            size: Some(metadata.len()),
            ..FileAttributes::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_fs_provider() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("app.exe");
        fs::write(&file_path, [0u8; 32])?;

        let provider = FsAttributeProvider;
        assert!(provider.exists(&file_path));
        assert!(!provider.exists(&dir.path().join("missing.dll")));

        let attributes = provider.attributes(&file_path)?;
        assert_eq!(attributes.size, Some(32));
        assert_eq!(attributes.version_string(VersionField::ProductName), None);
        assert!(provider.attributes(&dir.path().join("missing.dll")).is_err());
        Ok(())
    }

    #[test]
    fn test_version_field_keys() {
        let keys: Vec<_> = VersionField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys[0], "CompanyName");
        assert_eq!(keys[7], "ProductVersion");
        assert_eq!(VersionField::OriginalFilename.to_string(), "OriginalFilename");
    }
}
