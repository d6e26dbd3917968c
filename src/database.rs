//! In-memory shim database.
//!
//! A database is a 12-byte header followed by a flat sequence of tagged
//! records. Reading slurps the whole file into a [`ByteStore`]; writing
//! appends records to the store and rewrites the file on
//! [`Database::close_and_flush`].

pub mod accessors;
pub mod list_builder;
pub mod navigator;
pub mod strings;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::Cursor;
use std::path::Path;

use crate::config::{DatabaseConfig, SUPPORTED_MAJOR_VERSION};
use crate::storage::buffer::ByteStore;
use crate::storage::disk::DatabaseFile;
use crate::storage::error::{SdbError, SdbResult};
use crate::tag::catalog::{TAG_STRINGTABLE, TAG_STRINGTABLE_ITEM};
use crate::tag::TagId;

pub use list_builder::ListBuilder;
pub use navigator::Children;
pub use strings::ResolvedString;

use strings::StringInterner;

/// Size of the file header in bytes. The first record starts here.
pub const HEADER_SIZE: u32 = 12;

/// File magic stored at offset 8.
pub const MAGIC: &[u8; 4] = b"sdbf";

/// Offset of the first child relative to a LIST record (tag + length).
pub(crate) const LIST_HEADER_SIZE: u32 = 6;

/// Parsed file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseHeader {
    pub version_major: u32,
    pub version_minor: u32,
}

impl DatabaseHeader {
    /// Parse and validate the magic. The version is not checked here.
    pub fn parse(bytes: &[u8]) -> SdbResult<Self> {
        if bytes.len() < HEADER_SIZE as usize {
            return Err(SdbError::Format(format!(
                "truncated header: {} bytes",
                bytes.len()
            )));
        }

        let mut cursor = Cursor::new(bytes);
        let version_major = cursor.read_u32::<LittleEndian>()?;
        let version_minor = cursor.read_u32::<LittleEndian>()?;

        if &bytes[8..12] != MAGIC {
            return Err(SdbError::Format(format!(
                "invalid magic {:02X?}",
                &bytes[8..12]
            )));
        }

        Ok(Self {
            version_major,
            version_minor,
        })
    }

    pub fn encode(&self) -> SdbResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_SIZE as usize);
        buf.write_u32::<LittleEndian>(self.version_major)?;
        buf.write_u32::<LittleEndian>(self.version_minor)?;
        buf.extend_from_slice(MAGIC);
        Ok(buf)
    }
}

/// A shim database held in memory.
///
/// Mutating methods take `&mut self`; views returned by readers borrow
/// `&self`, so a view can never outlive a reallocation of the buffer.
#[derive(Debug)]
pub struct Database {
    store: ByteStore,
    file: Option<DatabaseFile>,
    header: DatabaseHeader,
    string_table: Option<TagId>,
    interner: StringInterner,
    /// Lists begun but not yet ended, innermost last.
    open_lists: Vec<TagId>,
    sync_on_flush: bool,
}

impl Database {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> SdbResult<Self> {
        let mut file = DatabaseFile::open(path)?;
        let data = file.read_all()?;
        let mut db = Self::from_bytes(&data)?;
        db.file = Some(file);
        log::debug!(
            "opened {:?}: {} bytes, version {}.{}",
            path,
            data.len(),
            db.header.version_major,
            db.header.version_minor
        );
        Ok(db)
    }

    /// Load a database image that is already in memory.
    pub fn from_bytes(data: &[u8]) -> SdbResult<Self> {
        let header = DatabaseHeader::parse(data)?;
        if header.version_major != SUPPORTED_MAJOR_VERSION {
            return Err(SdbError::Format(format!(
                "unsupported major version {}",
                header.version_major
            )));
        }

        let mut db = Self {
            store: ByteStore::from_bytes(data)?,
            file: None,
            header,
            string_table: None,
            interner: StringInterner::default(),
            open_lists: Vec::new(),
            sync_on_flush: false,
        };
        db.string_table = db.locate_string_table();
        Ok(db)
    }

    /// Create (or truncate) a database file for writing.
    pub fn create(path: &Path) -> SdbResult<Self> {
        Self::create_with_config(path, DatabaseConfig::default())
    }

    pub fn create_with_config(path: &Path, config: DatabaseConfig) -> SdbResult<Self> {
        let file = DatabaseFile::create(path)?;
        let mut db = Self::in_memory(config)?;
        db.file = Some(file);
        Ok(db)
    }

    /// Start an empty database that has no backing file.
    pub fn in_memory(config: DatabaseConfig) -> SdbResult<Self> {
        let header = DatabaseHeader {
            version_major: config.version_major,
            version_minor: config.version_minor,
        };
        let mut store = ByteStore::with_capacity(config.initial_capacity);
        store.append(&header.encode()?)?;

        Ok(Self {
            store,
            file: None,
            header,
            string_table: None,
            interner: StringInterner::default(),
            open_lists: Vec::new(),
            sync_on_flush: config.sync_on_flush,
        })
    }

    /// Read the header versions of a database file without loading it.
    pub fn database_version(path: &Path) -> SdbResult<(u32, u32)> {
        let mut file = DatabaseFile::open(path)?;
        let header = DatabaseHeader::parse(&file.read_prefix(HEADER_SIZE as u64)?)?;
        Ok((header.version_major, header.version_minor))
    }

    /// Release the database without writing anything.
    pub fn close(self) {
        log::debug!("closing database ({} bytes)", self.store.len());
    }

    /// Emit pending interned strings, write the buffer to the backing file
    /// and release the database.
    pub fn close_and_flush(mut self) -> SdbResult<()> {
        self.commit_string_table()?;

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| SdbError::NotFound("backing file".to_string()))?;
        file.write_all(self.store.as_slice(), self.sync_on_flush)?;
        Ok(())
    }

    pub fn header(&self) -> DatabaseHeader {
        self.header
    }

    /// Total size of the database image, header included.
    pub fn size(&self) -> u32 {
        self.store.len()
    }

    /// Raw database image.
    pub fn as_bytes(&self) -> &[u8] {
        self.store.as_slice()
    }

    /// Copy `length` bytes at `offset` out of the database.
    pub fn read(&self, offset: u32, length: u32) -> SdbResult<Vec<u8>> {
        self.store.read(offset, length)
    }

    /// The string table found at open time or written by `close_and_flush`.
    pub fn string_table(&self) -> Option<TagId> {
        self.string_table
    }

    fn locate_string_table(&self) -> Option<TagId> {
        let found = self
            .children(TagId::ROOT)
            .find(|&child| self.tag_at(child) == TAG_STRINGTABLE);
        if let Some(tag_id) = found {
            log::debug!("string table at {}", tag_id);
        }
        found
    }

    /// Append the interned strings as the database's `STRINGTABLE` list.
    ///
    /// Called by `close_and_flush`; call it directly to resolve interned
    /// strings before flushing. Interning is rejected afterwards.
    ///
    /// The table must sit at the root, so committing while a list is still
    /// open is a `Format` error.
    pub fn commit_string_table(&mut self) -> SdbResult<Option<TagId>> {
        if self.interner.is_empty() {
            return Ok(None);
        }
        if let Some(open) = self.open_lists.last() {
            return Err(SdbError::Format(format!(
                "cannot write the string table while list {} is open",
                open
            )));
        }

        let interner = std::mem::take(&mut self.interner);
        let table = self.begin_list(TAG_STRINGTABLE)?;
        for item in interner.items() {
            self.write_string_tag(TAG_STRINGTABLE_ITEM, item)?;
        }
        self.end_list(table)?;
        self.string_table = Some(table);
        log::debug!("wrote {} interned strings at {}", interner.len(), table);
        Ok(Some(table))
    }
}

/// `base + delta`, or `OutOfRange` when the sum does not fit a `TagId`.
pub(crate) fn checked_offset(base: u32, delta: u32, size: u32) -> SdbResult<u32> {
    base.checked_add(delta).ok_or(SdbError::OutOfRange {
        offset: base,
        length: delta,
        size,
    })
}
