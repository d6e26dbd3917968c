//! Tree navigation over tagged records.
//!
//! Records are addressed by [`TagId`]. Every step re-validates sizes and
//! offsets against the buffer, so a corrupt length field ends the walk
//! instead of looping or reading out of bounds.

use super::{Database, HEADER_SIZE, LIST_HEADER_SIZE};
use crate::tag::{Tag, TagId, TagType};

impl Database {
    /// Tag of the record at `tag_id`, or [`Tag::NULL`] if it cannot be read.
    pub fn tag_at(&self, tag_id: TagId) -> Tag {
        match self.store.read_u16(tag_id.0) {
            Ok(raw) => Tag(raw),
            Err(_) => {
                log::trace!("failed to read tag at {}", tag_id);
                Tag::NULL
            }
        }
    }

    /// Total size of the record at `tag_id` including its header, or 0 if
    /// the record is unreadable.
    pub fn size_of(&self, tag_id: TagId) -> u32 {
        let tag = self.tag_at(tag_id);
        let Some(tag_type) = tag.tag_type() else {
            log::trace!("invalid tag {} at {}", tag, tag_id);
            return 0;
        };

        if let Some(size) = tag_type.fixed_size() {
            return size;
        }

        let length = tag_id
            .0
            .checked_add(2)
            .and_then(|offset| self.store.read_u32(offset).ok());
        match length.and_then(|length| length.checked_add(LIST_HEADER_SIZE)) {
            Some(size) => size,
            None => {
                log::trace!("failed to read size of {} at {}", tag, tag_id);
                0
            }
        }
    }

    /// First child of `parent`. For [`TagId::ROOT`] this is the first record
    /// after the header.
    pub fn first_child(&self, parent: TagId) -> Option<TagId> {
        if parent.is_root() {
            return (self.store.len() > HEADER_SIZE).then_some(TagId(HEADER_SIZE));
        }

        if !self.tag_at(parent).is_type(TagType::List) {
            return None;
        }

        // An empty list has no first child; parent + 6 would be its sibling.
        if self.size_of(parent) <= LIST_HEADER_SIZE {
            return None;
        }

        parent.0.checked_add(LIST_HEADER_SIZE).map(TagId)
    }

    /// Sibling following `prev` inside `parent`.
    pub fn next_child(&self, parent: TagId, prev: TagId) -> Option<TagId> {
        let prev_size = self.size_of(prev);
        if prev_size == 0 {
            log::trace!("failed to read size of child {}", prev);
            return None;
        }

        let next = prev.0.checked_add(prev_size)?;
        if next >= self.store.len() {
            return None;
        }

        if parent.is_root() {
            return Some(TagId(next));
        }

        let parent_size = self.size_of(parent);
        if parent_size == 0 {
            log::trace!("failed to read size of parent {}", parent);
            return None;
        }

        // Children end at parent + 6 + declared length.
        let end = parent.0.checked_add(parent_size)?;
        if next >= end {
            return None;
        }

        Some(TagId(next))
    }

    /// Iterate over the direct children of `parent` in document order.
    pub fn children(&self, parent: TagId) -> Children<'_> {
        Children {
            db: self,
            parent,
            next: self.first_child(parent),
        }
    }

    /// First direct child of `parent` carrying exactly `tag`.
    pub fn find_first_tag(&self, parent: TagId, tag: Tag) -> Option<TagId> {
        self.find_from(parent, self.first_child(parent), tag)
    }

    /// Next sibling after `prev` carrying the same tag as `prev`.
    pub fn find_next_tag(&self, parent: TagId, prev: TagId) -> Option<TagId> {
        let tag = self.tag_at(prev);
        if tag == Tag::NULL {
            return None;
        }
        self.find_from(parent, self.next_child(parent, prev), tag)
    }

    /// First child of `parent` tagged `find` whose `name_tag` child resolves
    /// to the string `name`.
    pub fn find_first_named_tag(
        &self,
        parent: TagId,
        find: Tag,
        name_tag: Tag,
        name: &str,
    ) -> Option<TagId> {
        let mut current = self.find_first_tag(parent, find);
        while let Some(candidate) = current {
            let candidate_name = self
                .find_first_tag(candidate, name_tag)
                .and_then(|name_id| self.string_tag(name_id));
            if candidate_name.as_deref() == Some(name) {
                return Some(candidate);
            }
            current = self.find_next_tag(parent, candidate);
        }
        None
    }

    fn find_from(&self, parent: TagId, start: Option<TagId>, tag: Tag) -> Option<TagId> {
        let mut current = start;
        while let Some(child) = current {
            if self.tag_at(child) == tag {
                return Some(child);
            }
            current = self.next_child(parent, child);
        }
        None
    }
}

/// Iterator over the children of a record, see [`Database::children`].
pub struct Children<'a> {
    db: &'a Database,
    parent: TagId,
    next: Option<TagId>,
}

impl Iterator for Children<'_> {
    type Item = TagId;

    fn next(&mut self) -> Option<TagId> {
        let current = self.next?;
        self.next = self.db.next_child(self.parent, current);
        Some(current)
    }
}
