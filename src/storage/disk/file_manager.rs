use crate::storage::error::{SdbError, SdbResult};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Backing file of a shim database.
///
/// The engine never does partial I/O: the whole file is read once on open
/// and rewritten in full on flush.
#[derive(Debug)]
pub struct DatabaseFile {
    file: File,
    path: PathBuf,
    writable: bool,
}

impl DatabaseFile {
    /// Create (or truncate) a file for writing.
    pub fn create(path: &Path) -> SdbResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        log::debug!("created database file {:?}", path);

        Ok(Self {
            file,
            path: path.to_path_buf(),
            writable: true,
        })
    }

    /// Open an existing file for reading.
    pub fn open(path: &Path) -> SdbResult<Self> {
        let file = OpenOptions::new().read(true).open(path)?;
        log::debug!("opened database file {:?}", path);

        Ok(Self {
            file,
            path: path.to_path_buf(),
            writable: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Read the complete file contents.
    pub fn read_all(&mut self) -> SdbResult<Vec<u8>> {
        let size = self.file.metadata()?.len();
        let size = u32::try_from(size).map_err(|_| {
            SdbError::Format(format!("database file is too large ({} bytes)", size))
        })?;

        let mut data = Vec::with_capacity(size as usize);
        self.file.seek(SeekFrom::Start(0))?;
        self.file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read at most `len` bytes from the start of the file.
    pub fn read_prefix(&mut self, len: u64) -> SdbResult<Vec<u8>> {
        let mut data = Vec::new();
        self.file.seek(SeekFrom::Start(0))?;
        (&mut self.file).take(len).read_to_end(&mut data)?;
        Ok(data)
    }

    /// Replace the file contents with `data`.
    pub fn write_all(&mut self, data: &[u8], sync: bool) -> SdbResult<()> {
        if !self.writable {
            return Err(SdbError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("database file {:?} was opened read-only", self.path),
            )));
        }

        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(data)?;
        if sync {
            self.file.sync_all()?;
        }
        log::debug!("wrote {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_create_write_and_read_back() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.sdb");

        {
            let mut file = DatabaseFile::create(&file_path)?;
            assert!(file.is_writable());
            file.write_all(b"hello world", true)?;
        }

        let mut file = DatabaseFile::open(&file_path)?;
        assert!(!file.is_writable());
        assert_eq!(file.read_all()?, b"hello world");
        assert_eq!(file.read_prefix(5)?, b"hello");
        assert_eq!(file.read_prefix(100)?, b"hello world");

        Ok(())
    }

    #[test]
    fn test_rewrite_truncates() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.sdb");

        let mut file = DatabaseFile::create(&file_path)?;
        file.write_all(&[1u8; 64], false)?;
        file.write_all(&[2u8; 8], false)?;
        assert_eq!(file.read_all()?, vec![2u8; 8]);

        Ok(())
    }

    #[test]
    fn test_write_to_read_only_file_fails() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("test.sdb");
        DatabaseFile::create(&file_path)?;

        let mut file = DatabaseFile::open(&file_path)?;
        assert!(matches!(file.write_all(b"x", false), Err(SdbError::Io(_))));

        Ok(())
    }

    #[test]
    fn test_open_nonexistent_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("nonexistent.sdb");

        assert!(DatabaseFile::open(&file_path).is_err());

        Ok(())
    }
}
