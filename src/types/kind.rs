//! Tag kinds and the type-code registry.

use std::fmt;

use super::code;
use crate::error::NbtError;

/// The kind of an NBT tag, one per wire type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = code::END,
    Byte = code::BYTE,
    Short = code::SHORT,
    Int = code::INT,
    Long = code::LONG,
    Float = code::FLOAT,
    Double = code::DOUBLE,
    ByteArray = code::BYTE_ARRAY,
    String = code::STRING,
    List = code::LIST,
    Compound = code::COMPOUND,
    IntArray = code::INT_ARRAY,
}

/// How a kind's payload is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLayout {
    /// No payload (End).
    None,
    /// A fixed number of big-endian bytes.
    Fixed(usize),
    /// A big-endian length prefix of `prefix` bytes, then that many
    /// elements of `element` bytes each.
    Prefixed { prefix: usize, element: usize },
    /// A nested container, driven by the codec's frame stack.
    Container,
}

impl TagKind {
    /// Returns the wire type code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn layout(self) -> PayloadLayout {
        match self {
            Self::End => PayloadLayout::None,
            Self::Byte => PayloadLayout::Fixed(1),
            Self::Short => PayloadLayout::Fixed(2),
            Self::Int | Self::Float => PayloadLayout::Fixed(4),
            Self::Long | Self::Double => PayloadLayout::Fixed(8),
            Self::ByteArray => PayloadLayout::Prefixed { prefix: 4, element: 1 },
            Self::IntArray => PayloadLayout::Prefixed { prefix: 4, element: 4 },
            Self::String => PayloadLayout::Prefixed { prefix: 2, element: 1 },
            Self::List | Self::Compound => PayloadLayout::Container,
        }
    }

    /// Returns `true` for List and Compound.
    pub const fn is_container(self) -> bool {
        matches!(self.layout(), PayloadLayout::Container)
    }
}

impl TryFrom<u8> for TagKind {
    type Error = NbtError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            code::END => Self::End,
            code::BYTE => Self::Byte,
            code::SHORT => Self::Short,
            code::INT => Self::Int,
            code::LONG => Self::Long,
            code::FLOAT => Self::Float,
            code::DOUBLE => Self::Double,
            code::BYTE_ARRAY => Self::ByteArray,
            code::STRING => Self::String,
            code::LIST => Self::List,
            code::COMPOUND => Self::Compound,
            code::INT_ARRAY => Self::IntArray,
            _ => return Err(NbtError::format(format!("unknown tag type: 0x{value:02X}"))),
        })
    }
}

impl From<TagKind> for u8 {
    fn from(kind: TagKind) -> Self {
        kind.code()
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
        };
        f.write_str(name)
    }
}
