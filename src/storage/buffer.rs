//! Growable byte store backing a shim database.
//!
//! All offsets are `u32`, matching the on-disk `TAGID` width. Every read is
//! bounds- and overflow-checked here so that callers never repeat the check.

use bytes::{BufMut, BytesMut};
use byteorder::{ByteOrder, LittleEndian};

use crate::storage::error::{SdbError, SdbResult};

/// Default capacity of a freshly created store.
pub const DEFAULT_CAPACITY: usize = 4096;

/// Append-only byte buffer with checked random access.
///
/// The logical capacity doubles whenever an append would overflow it, so the
/// number of reallocations stays logarithmic in the final size.
#[derive(Debug, Clone)]
pub struct ByteStore {
    data: BytesMut,
    capacity: usize,
}

impl ByteStore {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Wrap bytes read from disk. The write cursor is placed at the end.
    ///
    /// Images that do not fit a `u32` offset are rejected.
    pub fn from_bytes(bytes: &[u8]) -> SdbResult<Self> {
        checked_len(bytes.len())?;
        let data = BytesMut::from(bytes);
        let capacity = data.len().max(1);
        Ok(Self { data, capacity })
    }

    /// Number of bytes written so far (also the write cursor).
    pub fn len(&self) -> u32 {
        // bounded by from_bytes and grow_for
        self.data.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Borrow `length` bytes at `offset`.
    pub fn slice(&self, offset: u32, length: u32) -> SdbResult<&[u8]> {
        let end = self.checked_end(offset, length)?;
        Ok(&self.data[offset as usize..end as usize])
    }

    /// Copy `length` bytes at `offset` into an owned buffer.
    pub fn read(&self, offset: u32, length: u32) -> SdbResult<Vec<u8>> {
        self.slice(offset, length).map(|bytes| bytes.to_vec())
    }

    pub fn read_u8(&self, offset: u32) -> SdbResult<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: u32) -> SdbResult<u16> {
        Ok(LittleEndian::read_u16(self.slice(offset, 2)?))
    }

    pub fn read_u32(&self, offset: u32) -> SdbResult<u32> {
        Ok(LittleEndian::read_u32(self.slice(offset, 4)?))
    }

    pub fn read_u64(&self, offset: u32) -> SdbResult<u64> {
        Ok(LittleEndian::read_u64(self.slice(offset, 8)?))
    }

    /// Append `bytes` at the write cursor, growing the buffer if needed.
    pub fn append(&mut self, bytes: &[u8]) -> SdbResult<()> {
        self.grow_for(bytes.len())?;
        self.data.put_slice(bytes);
        Ok(())
    }

    pub fn append_u16(&mut self, value: u16) -> SdbResult<()> {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.append(&buf)
    }

    pub fn append_u32(&mut self, value: u32) -> SdbResult<()> {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.append(&buf)
    }

    pub fn append_u64(&mut self, value: u64) -> SdbResult<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        self.append(&buf)
    }

    /// Advance the cursor over `count` zero bytes, to be patched later.
    pub fn reserve_zeroed(&mut self, count: u32) -> SdbResult<()> {
        self.grow_for(count as usize)?;
        self.data.put_bytes(0, count as usize);
        Ok(())
    }

    /// Overwrite already written bytes at `offset`.
    pub fn patch(&mut self, offset: u32, bytes: &[u8]) -> SdbResult<()> {
        let length = u32::try_from(bytes.len()).map_err(|_| SdbError::OutOfRange {
            offset,
            length: u32::MAX,
            size: self.len(),
        })?;
        let end = self.checked_end(offset, length)?;
        self.data[offset as usize..end as usize].copy_from_slice(bytes);
        Ok(())
    }

    pub fn patch_u32(&mut self, offset: u32, value: u32) -> SdbResult<()> {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.patch(offset, &buf)
    }

    fn checked_end(&self, offset: u32, length: u32) -> SdbResult<u32> {
        let size = self.len();
        match offset.checked_add(length) {
            Some(end) if end <= size => Ok(end),
            _ => Err(SdbError::OutOfRange {
                offset,
                length,
                size,
            }),
        }
    }

    fn grow_for(&mut self, additional: usize) -> SdbResult<()> {
        let out_of_range = || SdbError::OutOfRange {
            offset: self.len(),
            length: u32::try_from(additional).unwrap_or(u32::MAX),
            size: self.len(),
        };
        let required = self
            .data
            .len()
            .checked_add(additional)
            .filter(|&required| required <= u32::MAX as usize)
            .ok_or_else(out_of_range)?;

        if required > self.capacity {
            let mut capacity = self.capacity;
            while capacity < required {
                capacity = capacity.saturating_mul(2);
            }
            log::trace!(
                "growing byte store from {} to {} bytes",
                self.capacity,
                capacity
            );
            self.data.reserve(capacity - self.data.len());
            self.capacity = capacity;
        }
        Ok(())
    }
}

impl Default for ByteStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Length of a database image as a `u32`, or `Format` when it is too large.
pub(crate) fn checked_len(len: usize) -> SdbResult<u32> {
    u32::try_from(len)
        .map_err(|_| SdbError::Format(format!("database image is too large ({} bytes)", len)))
}
