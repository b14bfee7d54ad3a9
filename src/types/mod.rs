//! NBT tag model: the tag sum type, its containers, and the kind registry.

mod compound;
mod deep;
mod kind;
mod list;
mod tag;

pub use compound::CompoundTag;
pub use kind::{PayloadLayout, TagKind};
pub use list::{IntArrayTag, ListTag};
pub use tag::{BYTE_MAX, BYTE_MIN, ByteArrayTag, ByteRepr, StringTag, Tag};

/// Wire type codes for each tag kind.
pub mod code {
    pub const END: u8 = 0;
    pub const BYTE: u8 = 1;
    pub const SHORT: u8 = 2;
    pub const INT: u8 = 3;
    pub const LONG: u8 = 4;
    pub const FLOAT: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const BYTE_ARRAY: u8 = 7;
    pub const STRING: u8 = 8;
    pub const LIST: u8 = 9;
    pub const COMPOUND: u8 = 10;
    pub const INT_ARRAY: u8 = 11;
}
