//! The `Tag` sum type and its validated scalar payloads.

use std::fmt;

use super::{CompoundTag, IntArrayTag, ListTag, TagKind, deep};
use crate::error::ValidationError;

/// Smallest value a Byte tag accepts.
///
/// Byte tags are unsigned here: several producers store `0..=255` block ids
/// and use 255 as an "unset" sentinel, which a signed range cannot hold.
pub const BYTE_MIN: i64 = 0;
/// Largest value a Byte tag accepts.
pub const BYTE_MAX: i64 = 255;
/// Storage and wire representation of a Byte payload; must hold
/// `BYTE_MIN..=BYTE_MAX`.
pub type ByteRepr = u8;

/// A single node of an NBT tree.
///
/// End is not a value; it only exists as a [`TagKind`].
///
/// `PartialEq` and `Clone` walk the tree with a heap worklist, so they work
/// at any nesting depth. `Debug` and `Display` recurse and are meant for
/// trees of ordinary depth.
#[derive(Debug)]
pub enum Tag {
    Byte(ByteRepr),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArrayTag),
    String(StringTag),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(IntArrayTag),
}

impl Tag {
    /// Builds a Byte tag, checking the value against `BYTE_MIN..=BYTE_MAX`.
    pub fn byte(value: i64) -> Result<Self, ValidationError> {
        check_range(TagKind::Byte, value.into(), BYTE_MIN.into(), BYTE_MAX.into())?;
        Ok(Self::Byte(value as ByteRepr))
    }

    pub fn short(value: i64) -> Result<Self, ValidationError> {
        check_range(
            TagKind::Short,
            value.into(),
            i16::MIN.into(),
            i16::MAX.into(),
        )?;
        Ok(Self::Short(value as i16))
    }

    pub fn int(value: i64) -> Result<Self, ValidationError> {
        Ok(Self::Int(check_i32(TagKind::Int, value)?))
    }

    pub fn long(value: i128) -> Result<Self, ValidationError> {
        check_range(TagKind::Long, value, i64::MIN.into(), i64::MAX.into())?;
        Ok(Self::Long(value as i64))
    }

    pub fn float(value: f32) -> Self {
        Self::Float(value)
    }

    pub fn double(value: f64) -> Self {
        Self::Double(value)
    }

    /// Builds a String tag; fails if the UTF-8 encoding exceeds 65535 bytes.
    pub fn string(value: impl Into<String>) -> Result<Self, ValidationError> {
        StringTag::new(value).map(Self::String)
    }

    /// Returns the kind of this tag.
    pub fn kind(&self) -> TagKind {
        match self {
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
        }
    }

    pub fn as_byte(&self) -> Option<ByteRepr> {
        match self {
            Self::Byte(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the text of a String tag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Self::ByteArray(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&IntArrayTag> {
        match self {
            Self::IntArray(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListTag> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListTag> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundTag> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundTag> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }
}

impl Clone for Tag {
    fn clone(&self) -> Self {
        deep::clone_tag(self)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        deep::tags_eq(vec![(self, other)])
    }
}

pub(crate) fn check_range(
    kind: TagKind,
    value: i128,
    min: i128,
    max: i128,
) -> Result<(), ValidationError> {
    if value < min || max < value {
        Err(ValidationError::OutOfRange {
            kind,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

pub(crate) fn check_i32(kind: TagKind, value: i64) -> Result<i32, ValidationError> {
    check_range(kind, value.into(), i32::MIN.into(), i32::MAX.into())?;
    Ok(value as i32)
}

// -- Length-checked payloads --

/// UTF-8 text whose encoded length fits the u16 wire prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringTag(String);

impl StringTag {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        ValidationError::check_str_len(TagKind::String, &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Raw bytes whose length fits the u32 wire prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteArrayTag(Vec<u8>);

impl ByteArrayTag {
    pub fn new(value: impl Into<Vec<u8>>) -> Result<Self, ValidationError> {
        let value = value.into();
        ValidationError::check_seq_len(TagKind::ByteArray, value.len())?;
        Ok(Self(value))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

// -- Convenience conversions --

impl From<ByteRepr> for Tag {
    fn from(b: ByteRepr) -> Self {
        Self::Byte(b)
    }
}

impl From<i16> for Tag {
    fn from(s: i16) -> Self {
        Self::Short(s)
    }
}

impl From<i32> for Tag {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<i64> for Tag {
    fn from(l: i64) -> Self {
        Self::Long(l)
    }
}

impl From<f32> for Tag {
    fn from(f: f32) -> Self {
        Self::Float(f)
    }
}

impl From<f64> for Tag {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<StringTag> for Tag {
    fn from(s: StringTag) -> Self {
        Self::String(s)
    }
}

impl From<ByteArrayTag> for Tag {
    fn from(b: ByteArrayTag) -> Self {
        Self::ByteArray(b)
    }
}

impl From<IntArrayTag> for Tag {
    fn from(a: IntArrayTag) -> Self {
        Self::IntArray(a)
    }
}

impl From<ListTag> for Tag {
    fn from(l: ListTag) -> Self {
        Self::List(l)
    }
}

impl From<CompoundTag> for Tag {
    fn from(c: CompoundTag) -> Self {
        Self::Compound(c)
    }
}

impl TryFrom<&str> for Tag {
    type Error = ValidationError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::string(s)
    }
}

impl TryFrom<String> for Tag {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::string(s)
    }
}

impl TryFrom<Vec<u8>> for Tag {
    type Error = ValidationError;

    fn try_from(b: Vec<u8>) -> Result<Self, Self::Error> {
        ByteArrayTag::new(b).map(Self::ByteArray)
    }
}

impl fmt::Display for StringTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) => write!(f, "{b}b"),
            Self::Short(s) => write!(f, "{s}s"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}L"),
            Self::Float(v) => write!(f, "{v}f"),
            Self::Double(v) => write!(f, "{v}d"),
            Self::ByteArray(b) => write!(f, "<{} bytes>", b.len()),
            Self::String(s) => write!(f, "{s}"),
            Self::List(l) => {
                write!(f, "[")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Compound(c) => {
                write!(f, "{{")?;
                for (i, (k, v)) in c.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::IntArray(a) => {
                write!(f, "[I; ")?;
                for (i, v) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}
