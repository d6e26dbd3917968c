//! Typed read and write accessors.
//!
//! Writers check that the tag's type selector matches the value being
//! written and append the record at the cursor. Readers never fail: on a
//! type mismatch or unreadable record they return the caller's default.

use std::fs;
use std::path::Path;

use super::strings::{check_text, encode_utf16};
use super::{checked_offset, Database, LIST_HEADER_SIZE};
use crate::storage::buffer::ByteStore;
use crate::storage::error::{SdbError, SdbResult};
use crate::tag::{Tag, TagId, TagType};

impl Database {
    pub fn write_null_tag(&mut self, tag: Tag) -> SdbResult<()> {
        self.append_tag(tag, TagType::Null)
    }

    pub fn write_byte_tag(&mut self, tag: Tag, value: u8) -> SdbResult<()> {
        self.append_tag(tag, TagType::Byte)?;
        self.store.append(&[value])
    }

    pub fn write_word_tag(&mut self, tag: Tag, value: u16) -> SdbResult<()> {
        self.append_tag(tag, TagType::Word)?;
        self.store.append_u16(value)
    }

    pub fn write_dword_tag(&mut self, tag: Tag, value: u32) -> SdbResult<()> {
        self.append_tag(tag, TagType::Dword)?;
        self.store.append_u32(value)
    }

    pub fn write_qword_tag(&mut self, tag: Tag, value: u64) -> SdbResult<()> {
        self.append_tag(tag, TagType::Qword)?;
        self.store.append_u64(value)
    }

    /// Append an inline `STRING` record. `value` may not contain NUL.
    pub fn write_string_tag(&mut self, tag: Tag, value: &str) -> SdbResult<()> {
        check_type(tag, TagType::String)?;
        check_text(value)?;
        self.append_sized(tag, &encode_utf16(value))
    }

    /// Append a `STRINGREF` record. The reference is not validated.
    pub fn write_string_ref_tag(&mut self, tag: Tag, reference: u32) -> SdbResult<()> {
        self.append_tag(tag, TagType::StringRef)?;
        self.store.append_u32(reference)
    }

    pub fn write_binary_tag(&mut self, tag: Tag, data: &[u8]) -> SdbResult<()> {
        check_type(tag, TagType::Binary)?;
        self.append_sized(tag, data)
    }

    /// Append a `BINARY` record holding the contents of the file at `path`.
    pub fn write_binary_tag_from_file(&mut self, tag: Tag, path: &Path) -> SdbResult<()> {
        check_type(tag, TagType::Binary)?;
        let data = fs::read(path)?;
        self.append_sized(tag, &data)
    }

    pub fn read_byte_tag(&self, tag_id: TagId, default: u8) -> u8 {
        self.read_fixed(tag_id, TagType::Byte, default, ByteStore::read_u8)
    }

    pub fn read_word_tag(&self, tag_id: TagId, default: u16) -> u16 {
        self.read_fixed(tag_id, TagType::Word, default, ByteStore::read_u16)
    }

    pub fn read_dword_tag(&self, tag_id: TagId, default: u32) -> u32 {
        self.read_fixed(tag_id, TagType::Dword, default, ByteStore::read_u32)
    }

    pub fn read_qword_tag(&self, tag_id: TagId, default: u64) -> u64 {
        self.read_fixed(tag_id, TagType::Qword, default, ByteStore::read_u64)
    }

    /// Raw reference stored in a `STRINGREF` record.
    pub fn read_string_ref_tag(&self, tag_id: TagId, default: u32) -> u32 {
        self.read_fixed(tag_id, TagType::StringRef, default, ByteStore::read_u32)
    }

    /// Payload of a `BINARY` record, borrowed from the database.
    pub fn binary_tag_data(&self, tag_id: TagId) -> Option<&[u8]> {
        if !self.tag_at(tag_id).is_type(TagType::Binary) {
            log::trace!("{} is not a binary tag", tag_id);
            return None;
        }

        let size = self.store.len();
        let length = self.store.read_u32(tag_id.0.checked_add(2)?).ok()?;
        let offset = checked_offset(tag_id.0, LIST_HEADER_SIZE, size).ok()?;
        self.store.slice(offset, length).ok()
    }

    /// Copy `dest.len()` bytes of a `BINARY` record into `dest`.
    ///
    /// The copy starts at the record itself, tag and length included, not at
    /// its payload. Use [`Database::binary_tag_data`] for the payload.
    pub fn read_binary_tag(&self, tag_id: TagId, dest: &mut [u8]) -> SdbResult<()> {
        let tag = self.tag_at(tag_id);
        check_type(tag, TagType::Binary)?;

        let length = u32::try_from(dest.len()).map_err(|_| SdbError::OutOfRange {
            offset: tag_id.0,
            length: u32::MAX,
            size: self.store.len(),
        })?;
        dest.copy_from_slice(self.store.slice(tag_id.0, length)?);
        Ok(())
    }

    fn append_tag(&mut self, tag: Tag, expected: TagType) -> SdbResult<()> {
        check_type(tag, expected)?;
        self.store.append_u16(tag.0)
    }

    fn append_sized(&mut self, tag: Tag, payload: &[u8]) -> SdbResult<()> {
        let length = u32::try_from(payload.len()).map_err(|_| SdbError::OutOfRange {
            offset: self.store.len(),
            length: u32::MAX,
            size: self.store.len(),
        })?;
        self.store.append_u16(tag.0)?;
        self.store.append_u32(length)?;
        self.store.append(payload)
    }

    fn read_fixed<T>(
        &self,
        tag_id: TagId,
        expected: TagType,
        default: T,
        read: impl Fn(&ByteStore, u32) -> SdbResult<T>,
    ) -> T {
        if !self.tag_at(tag_id).is_type(expected) {
            log::trace!("{} is not a {:?} tag", tag_id, expected);
            return default;
        }

        match tag_id.0.checked_add(2) {
            Some(offset) => read(&self.store, offset).unwrap_or(default),
            None => default,
        }
    }
}

pub(crate) fn check_type(tag: Tag, expected: TagType) -> SdbResult<()> {
    if tag.is_type(expected) {
        Ok(())
    } else {
        Err(SdbError::TypeMismatch { tag, expected })
    }
}
