//! String resolution and interning.
//!
//! Strings are stored as little-endian UTF-16 with a terminating NUL that is
//! counted in the record length. A `STRING` record carries its text inline; a
//! `STRINGREF` record carries the offset of a `STRINGTABLE_ITEM` relative to
//! the start of the database's string table.

use std::collections::HashMap;

use super::{checked_offset, Database, LIST_HEADER_SIZE};
use crate::storage::error::{SdbError, SdbResult};
use crate::tag::{Tag, TagId, TagType};

/// Location of a string payload inside the database buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedString {
    /// Offset of the first byte of text.
    pub offset: u32,
    /// Payload length in bytes, terminator included.
    pub length: u32,
}

impl Database {
    /// Locate the text of a `STRING` or `STRINGREF` record.
    pub fn resolve_string(&self, tag_id: TagId) -> SdbResult<ResolvedString> {
        let size = self.store.len();
        let tag = Tag(self.store.read_u16(tag_id.0)?);

        let item = match tag.tag_type() {
            Some(TagType::String) => tag_id.0,
            Some(TagType::StringRef) => {
                let table = self.string_table.ok_or_else(|| {
                    SdbError::NotFound(format!("string table for stringref at {}", tag_id))
                })?;
                let relative = self.store.read_u32(checked_offset(tag_id.0, 2, size)?)?;
                checked_offset(table.0, relative, size)?
            }
            _ => {
                return Err(SdbError::TypeMismatch {
                    tag,
                    expected: TagType::String,
                })
            }
        };

        let length = self.store.read_u32(checked_offset(item, 2, size)?)?;
        let offset = checked_offset(item, LIST_HEADER_SIZE, size)?;
        self.store.slice(offset, length)?;
        Ok(ResolvedString { offset, length })
    }

    /// Raw UTF-16LE bytes of a string, borrowed from the database.
    pub fn string_tag_bytes(&self, tag_id: TagId) -> Option<&[u8]> {
        let resolved = self
            .resolve_string(tag_id)
            .map_err(|e| log::trace!("failed to resolve string at {}: {}", tag_id, e))
            .ok()?;
        self.store.slice(resolved.offset, resolved.length).ok()
    }

    /// Decoded text of a string, up to its terminating NUL.
    pub fn string_tag(&self, tag_id: TagId) -> Option<String> {
        self.string_tag_bytes(tag_id).map(decode_utf16)
    }

    /// Copy the raw bytes of a string into `dest`.
    ///
    /// Fails with `BufferTooSmall` and leaves `dest` untouched when it cannot
    /// hold the whole string. Returns the number of bytes copied.
    pub fn copy_string_into(&self, tag_id: TagId, dest: &mut [u8]) -> SdbResult<usize> {
        let resolved = self.resolve_string(tag_id)?;
        let length = resolved.length as usize;
        if dest.len() < length {
            return Err(SdbError::BufferTooSmall {
                required: length,
                available: dest.len(),
            });
        }

        dest[..length].copy_from_slice(self.store.slice(resolved.offset, resolved.length)?);
        Ok(length)
    }

    /// Copy a string into a buffer of UTF-16 code units.
    ///
    /// Same contract as [`Database::copy_string_into`] with the capacity
    /// counted in characters. Returns the number of code units copied.
    /// A record whose byte length is odd is a `Format` error.
    pub fn read_string_tag(&self, tag_id: TagId, dest: &mut [u16]) -> SdbResult<usize> {
        let resolved = self.resolve_string(tag_id)?;
        if resolved.length % 2 != 0 {
            return Err(SdbError::Format(format!(
                "string at {} has odd byte length {}",
                tag_id, resolved.length
            )));
        }
        let length = resolved.length as usize;
        let available = dest.len() * 2;
        if available < length {
            return Err(SdbError::BufferTooSmall {
                required: length,
                available,
            });
        }

        let bytes = self.store.slice(resolved.offset, resolved.length)?;
        for (unit, pair) in dest.iter_mut().zip(bytes.chunks_exact(2)) {
            *unit = u16::from_le_bytes([pair[0], pair[1]]);
        }
        Ok(length / 2)
    }

    /// Write `value` as a `STRINGREF` into the pending string table.
    ///
    /// Equal strings share one table entry. The table is appended by
    /// [`Database::commit_string_table`] or `close_and_flush`.
    pub fn write_interned_string_tag(&mut self, tag: Tag, value: &str) -> SdbResult<()> {
        if !tag.is_type(TagType::StringRef) {
            return Err(SdbError::TypeMismatch {
                tag,
                expected: TagType::StringRef,
            });
        }
        if self.string_table.is_some() {
            return Err(SdbError::Format(
                "database already has a string table".to_string(),
            ));
        }
        check_text(value)?;

        let reference = self.interner.intern(value)?;
        self.write_string_ref_tag(tag, reference)
    }
}

/// Deduplicating builder for the write-side string table.
#[derive(Debug, Default)]
pub(crate) struct StringInterner {
    offsets: HashMap<String, u32>,
    items: Vec<String>,
    next_offset: u32,
}

impl StringInterner {
    /// Offset of `value`'s item relative to the string table start.
    pub(crate) fn intern(&mut self, value: &str) -> SdbResult<u32> {
        if let Some(&offset) = self.offsets.get(value) {
            return Ok(offset);
        }

        let offset = if self.items.is_empty() {
            LIST_HEADER_SIZE
        } else {
            self.next_offset
        };
        let encoded_len = u32::try_from(encode_utf16(value).len()).ok();
        let next = encoded_len
            .and_then(|len| len.checked_add(LIST_HEADER_SIZE))
            .and_then(|record| offset.checked_add(record))
            .ok_or(SdbError::OutOfRange {
                offset,
                length: encoded_len.unwrap_or(u32::MAX),
                size: u32::MAX,
            })?;

        self.offsets.insert(value.to_string(), offset);
        self.items.push(value.to_string());
        self.next_offset = next;
        Ok(offset)
    }

    pub(crate) fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Reject text that would be cut short by its own NUL on the way back.
pub(crate) fn check_text(value: &str) -> SdbResult<()> {
    match value.find('\0') {
        Some(index) => Err(SdbError::Format(format!(
            "string contains NUL at byte {}",
            index
        ))),
        None => Ok(()),
    }
}

/// Encode `value` as UTF-16LE followed by a NUL terminator.
pub fn encode_utf16(value: &str) -> Vec<u8> {
    value
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

/// Decode UTF-16LE text, stopping at the first NUL.
pub fn decode_utf16(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|&unit| unit != 0);
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
