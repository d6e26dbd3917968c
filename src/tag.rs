//! Tag codec.
//!
//! A tag is a 16-bit value: the top nibble selects the record type, the next
//! nibble is an extension selector (`0x8` picks the alternate name table) and
//! the low byte is the id within that type.

pub mod catalog;
pub mod names;

use std::fmt;

pub use names::tag_to_name;

/// Record type selected by the top nibble of a tag.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Null = 0x1000,
    Byte = 0x2000,
    Word = 0x3000,
    Dword = 0x4000,
    Qword = 0x5000,
    StringRef = 0x6000,
    List = 0x7000,
    String = 0x8000,
    Binary = 0x9000,
}

impl TagType {
    pub const MASK: u16 = 0xF000;

    pub fn from_tag(tag: Tag) -> Option<Self> {
        match tag.0 & Self::MASK {
            0x1000 => Some(TagType::Null),
            0x2000 => Some(TagType::Byte),
            0x3000 => Some(TagType::Word),
            0x4000 => Some(TagType::Dword),
            0x5000 => Some(TagType::Qword),
            0x6000 => Some(TagType::StringRef),
            0x7000 => Some(TagType::List),
            0x8000 => Some(TagType::String),
            0x9000 => Some(TagType::Binary),
            _ => None,
        }
    }

    /// Total record size including the 2-byte tag, for fixed-size types.
    pub fn fixed_size(self) -> Option<u32> {
        match self {
            TagType::Null => Some(2),
            TagType::Byte => Some(1 + 2),
            TagType::Word => Some(2 + 2),
            TagType::Dword => Some(4 + 2),
            TagType::Qword => Some(8 + 2),
            TagType::StringRef => Some(4 + 2),
            TagType::List | TagType::String | TagType::Binary => None,
        }
    }

    /// Position of this type in per-type tables.
    pub(crate) fn index(self) -> usize {
        ((self as u16 >> 12) - 1) as usize
    }
}

/// A 16-bit record tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u16);

impl Tag {
    pub const NULL: Tag = Tag(0);

    /// Extension nibble value selecting the alternate name table.
    pub const ALTERNATE_EXTENSION: u8 = 0x8;

    pub const fn new(tag_type: TagType, id: u16) -> Self {
        Tag(tag_type as u16 | id)
    }

    pub fn tag_type(self) -> Option<TagType> {
        TagType::from_tag(self)
    }

    pub fn is_type(self, tag_type: TagType) -> bool {
        self.tag_type() == Some(tag_type)
    }

    pub fn extension(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub fn id(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn name(self) -> &'static str {
        tag_to_name(self)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Byte offset of a record within the database buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TagId(pub u32);

impl TagId {
    /// Invalid record.
    pub const NULL: TagId = TagId(0);

    /// Logical top of the tree. Never a real record: offset 0 is the header.
    pub const ROOT: TagId = TagId(0);

    pub fn offset(self) -> u32 {
        self.0
    }

    pub fn is_root(self) -> bool {
        self == TagId::ROOT
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}
