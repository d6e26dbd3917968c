//! Two-phase writing of LIST records.
//!
//! A LIST header is appended with a zero length, children are appended after
//! it, and the length is patched once the list is closed.

use std::ops::{Deref, DerefMut};

use super::accessors::check_type;
use super::{Database, LIST_HEADER_SIZE};
use crate::storage::error::{SdbError, SdbResult};
use crate::tag::{Tag, TagId, TagType};

impl Database {
    /// Append a LIST header and return its position for [`Database::end_list`].
    ///
    /// Lists may be nested; they must be closed in reverse order.
    pub fn begin_list(&mut self, tag: Tag) -> SdbResult<TagId> {
        check_type(tag, TagType::List)?;
        let start = TagId(self.store.len());
        self.store.append_u16(tag.0)?;
        self.store.reserve_zeroed(4)?;
        self.open_lists.push(start);
        Ok(start)
    }

    /// Patch the length of the list started at `tag_id` to cover everything
    /// written since.
    pub fn end_list(&mut self, tag_id: TagId) -> SdbResult<()> {
        let tag = self.tag_at(tag_id);
        check_type(tag, TagType::List)?;

        let length = self
            .store
            .len()
            .checked_sub(tag_id.0)
            .and_then(|written| written.checked_sub(LIST_HEADER_SIZE))
            .ok_or(SdbError::OutOfRange {
                offset: tag_id.0,
                length: LIST_HEADER_SIZE,
                size: self.store.len(),
            })?;
        self.store.patch_u32(tag_id.0 + 2, length)?;
        self.forget_open_list(tag_id);
        Ok(())
    }

    fn forget_open_list(&mut self, tag_id: TagId) {
        if let Some(index) = self.open_lists.iter().rposition(|&open| open == tag_id) {
            self.open_lists.remove(index);
        }
    }

    /// Start a list whose length is patched by [`ListBuilder::finish`].
    ///
    /// The builder dereferences to the database, so children (and nested
    /// lists) are written through it.
    pub fn list(&mut self, tag: Tag) -> SdbResult<ListBuilder<'_>> {
        let start = self.begin_list(tag)?;
        Ok(ListBuilder {
            db: self,
            start,
            finished: false,
        })
    }
}

/// Open LIST record, see [`Database::list`].
pub struct ListBuilder<'a> {
    db: &'a mut Database,
    start: TagId,
    finished: bool,
}

impl ListBuilder<'_> {
    pub fn start(&self) -> TagId {
        self.start
    }

    /// Close the list and return its position.
    pub fn finish(mut self) -> SdbResult<TagId> {
        self.finished = true;
        self.db.end_list(self.start)?;
        Ok(self.start)
    }
}

impl Deref for ListBuilder<'_> {
    type Target = Database;

    fn deref(&self) -> &Database {
        self.db
    }
}

impl DerefMut for ListBuilder<'_> {
    fn deref_mut(&mut self) -> &mut Database {
        self.db
    }
}

impl Drop for ListBuilder<'_> {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!("list {} dropped without finish(); length left at 0", self.start);
            // a zero-length list holds nothing, later records land beside it
            self.db.forget_open_list(self.start);
        }
    }
}
