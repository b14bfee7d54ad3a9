//! NBT decoding: bytes → `(name, CompoundTag)`.
//!
//! The decoder is an explicit-stack automaton. Each open container is a
//! [`Frame`] on a heap-allocated stack, so nesting depth is limited by
//! memory (or by [`Decoder::max_depth`]) and never by the call stack.

use std::io::Read;

use bytes::Buf;

use super::reader::TagReader;
use crate::error::NbtError;
use crate::types::{
    ByteArrayTag, CompoundTag, IntArrayTag, ListTag, PayloadLayout, StringTag, Tag, TagKind,
};

/// Default cap on the element capacity reserved from a List's declared count.
const DEFAULT_MAX_PREALLOCATION: usize = 4096;

/// Configurable NBT document decoder.
#[derive(Debug, Clone)]
pub struct Decoder {
    max_depth: Option<usize>,
    max_preallocation: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_preallocation: DEFAULT_MAX_PREALLOCATION,
        }
    }
}

impl Decoder {
    /// Creates a decoder with no depth limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how many containers may be open at once, the root included.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Caps how many List elements are reserved up front from the declared
    /// count. Larger lists still decode; they just grow as they are read.
    pub fn max_preallocation(mut self, elements: usize) -> Self {
        self.max_preallocation = elements;
        self
    }

    /// Decodes one complete document from `reader`.
    pub fn decode<R: Read>(&self, reader: R) -> Result<(String, CompoundTag), NbtError> {
        let mut src = TagReader::new(reader);

        if src.read_kind("tag type")? != TagKind::Compound {
            return Err(NbtError::format("root tag was not a compound"));
        }
        let name = src.read_string("tag name")?;
        let root = self.read_root(&mut src)?;

        tracing::debug!(
            name = %name,
            entries = root.len(),
            bytes = src.position(),
            "decoded NBT document"
        );
        Ok((name, root))
    }

    fn read_root<R: Read>(&self, src: &mut TagReader<R>) -> Result<CompoundTag, NbtError> {
        let mut stack = vec![Frame::compound()];

        loop {
            let Some(top) = stack.last_mut() else {
                return Err(NbtError::format("decoder frame stack underflow"));
            };

            match top.step(src)? {
                Step::Read(kind) => match kind.layout() {
                    PayloadLayout::Container => {
                        let frame = self.open_frame(kind, src, stack.len())?;
                        stack.push(frame);
                    }
                    PayloadLayout::None => {
                        return Err(NbtError::format("attempted to read a payload for End"));
                    }
                    PayloadLayout::Fixed(_) | PayloadLayout::Prefixed { .. } => {
                        let leaf = read_leaf(src, kind)?;
                        top.accept(leaf)?;
                    }
                },
                Step::Done => {
                    let Some(done) = stack.pop() else {
                        return Err(NbtError::format("decoder frame stack underflow"));
                    };
                    let value = done.into_tag();
                    match stack.last_mut() {
                        Some(parent) => parent.accept(value)?,
                        None => {
                            return match value {
                                Tag::Compound(root) => Ok(root),
                                _ => Err(NbtError::format("root tag was not a compound")),
                            };
                        }
                    }
                }
            }
        }
    }

    /// Builds the frame for a container payload, reading a List's header.
    fn open_frame<R: Read>(
        &self,
        kind: TagKind,
        src: &mut TagReader<R>,
        depth: usize,
    ) -> Result<Frame, NbtError> {
        if let Some(max) = self.max_depth
            && depth >= max
        {
            return Err(NbtError::format(format!(
                "nesting depth exceeds limit of {max}"
            )));
        }
        tracing::trace!(%kind, depth, "opening container frame");

        match kind {
            TagKind::Compound => Ok(Frame::compound()),
            TagKind::List => {
                let element_kind = src.read_kind("list element type")?;
                let target = src.read_u32("list length")?;
                if element_kind == TagKind::End && target > 0 {
                    return Err(NbtError::format(format!(
                        "list of End tags must be empty, got {target} elements"
                    )));
                }
                let capacity = (target as usize).min(self.max_preallocation);
                Ok(Frame::List {
                    tag: ListTag::with_capacity(element_kind, capacity),
                    target,
                })
            }
            other => Err(NbtError::format(format!("{other} is not a container"))),
        }
    }
}

/// Resumable state of one container being decoded.
enum Frame {
    Compound {
        tag: CompoundTag,
        pending_key: Option<String>,
    },
    List {
        tag: ListTag,
        target: u32,
    },
}

/// What a frame needs next.
enum Step {
    /// A payload of this kind.
    Read(TagKind),
    /// Nothing; the container is complete.
    Done,
}

impl Frame {
    fn compound() -> Self {
        Self::Compound {
            tag: CompoundTag::new(),
            pending_key: None,
        }
    }

    fn step<R: Read>(&mut self, src: &mut TagReader<R>) -> Result<Step, NbtError> {
        match self {
            Self::Compound { pending_key, .. } => match src.read_header()? {
                None => Ok(Step::Done),
                Some((kind, key)) => {
                    *pending_key = Some(key);
                    Ok(Step::Read(kind))
                }
            },
            Self::List { tag, target } => {
                if (tag.len() as u64) < u64::from(*target) {
                    Ok(Step::Read(tag.element_kind()))
                } else {
                    Ok(Step::Done)
                }
            }
        }
    }

    /// Feeds a finished child value into this container.
    fn accept(&mut self, value: Tag) -> Result<(), NbtError> {
        match self {
            Self::Compound { tag, pending_key } => {
                let key = pending_key
                    .take()
                    .ok_or_else(|| NbtError::format("compound received a value without a key"))?;
                tag.insert(key, value)?;
            }
            Self::List { tag, .. } => tag.push(value)?,
        }
        Ok(())
    }

    fn into_tag(self) -> Tag {
        match self {
            Self::Compound { tag, .. } => Tag::Compound(tag),
            Self::List { tag, .. } => Tag::List(tag),
        }
    }
}

/// Reads the payload of a non-container kind.
fn read_leaf<R: Read>(src: &mut TagReader<R>, kind: TagKind) -> Result<Tag, NbtError> {
    let tag = match kind {
        TagKind::Byte => Tag::Byte(src.read_byte("byte payload")?),
        TagKind::Short => Tag::Short(src.read_i16("short payload")?),
        TagKind::Int => Tag::Int(src.read_i32("int payload")?),
        TagKind::Long => Tag::Long(src.read_i64("long payload")?),
        TagKind::Float => Tag::Float(src.read_f32("float payload")?),
        TagKind::Double => Tag::Double(src.read_f64("double payload")?),
        TagKind::ByteArray => {
            let len = src.read_u32("byte array length")?;
            let data = src.read_bytes(len.into(), "byte array payload")?;
            Tag::ByteArray(ByteArrayTag::new(data)?)
        }
        TagKind::String => Tag::String(StringTag::new(src.read_string("string payload")?)?),
        TagKind::IntArray => {
            let len = src.read_u32("int array length")?;
            let data = src.read_bytes(u64::from(len) * 4, "int array payload")?;
            let mut raw = &data[..];
            let mut values = Vec::with_capacity(len as usize);
            while raw.has_remaining() {
                values.push(raw.get_i32());
            }
            Tag::IntArray(IntArrayTag::new(values)?)
        }
        TagKind::End | TagKind::List | TagKind::Compound => {
            return Err(NbtError::format(format!(
                "{kind} has no leaf payload"
            )));
        }
    };
    Ok(tag)
}

/// Decodes a document from `reader` with the default configuration.
pub fn decode_document<R: Read>(reader: R) -> Result<(String, CompoundTag), NbtError> {
    Decoder::new().decode(reader)
}

/// Decodes a document held in memory.
pub fn decode_slice(data: &[u8]) -> Result<(String, CompoundTag), NbtError> {
    decode_document(data)
}

/// Decodes a document from any `bytes::Buf`.
pub fn decode_buf(buf: impl Buf) -> Result<(String, CompoundTag), NbtError> {
    decode_document(buf.reader())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    /// `{"a": Int(42), "list": List<Byte>([1, 2])}` named "".
    const LITERAL: &[u8] = &[
        0x0A, 0x00, 0x00, // root header
        0x03, 0x00, 0x01, 0x61, 0x00, 0x00, 0x00, 0x2A, // "a": Int(42)
        0x09, 0x00, 0x04, 0x6C, 0x69, 0x73, 0x74, // "list" header
        0x01, 0x00, 0x00, 0x00, 0x02, // element type Byte, count 2
        0x01, 0x02, // payload
        0x00, // End
    ];

    #[test]
    fn decodes_literal_document() {
        let (name, root) = decode_slice(LITERAL).unwrap();
        assert_eq!(name, "");
        assert_eq!(root.len(), 2);
        assert_eq!(root.get("a"), Some(&Tag::Int(42)));
        let list = root.get("list").and_then(Tag::as_list).unwrap();
        assert_eq!(list.element_kind(), TagKind::Byte);
        assert_eq!(list.as_slice(), &[Tag::Byte(1), Tag::Byte(2)]);
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["a", "list"]);
    }

    #[test]
    fn decodes_from_buf() {
        let (_, root) = decode_buf(bytes::Bytes::from_static(LITERAL)).unwrap();
        assert_eq!(root.get("a"), Some(&Tag::Int(42)));
    }

    #[test]
    fn root_must_be_compound() {
        let data = [0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let err = decode_slice(&data).unwrap_err();
        assert!(matches!(err, NbtError::Format(ref m) if m == "root tag was not a compound"));

        // A bare End marker is not a document either.
        assert!(matches!(decode_slice(&[0x00]), Err(NbtError::Format(_))));

        // The type is checked before the root name is read.
        let err = decode_slice(&[0x03]).unwrap_err();
        assert!(matches!(err, NbtError::Format(ref m) if m == "root tag was not a compound"));
    }

    #[test]
    fn named_root() {
        let data = [0x0A, 0x00, 0x05, b'h', b'e', b'l', b'l', b'o', 0x00];
        let (name, root) = decode_slice(&data).unwrap();
        assert_eq!(name, "hello");
        assert!(root.is_empty());
    }

    #[test]
    fn unknown_type_code() {
        let data = [0x0A, 0x00, 0x00, 0x0C, 0x00, 0x00];
        assert!(matches!(decode_slice(&data), Err(NbtError::Format(_))));
    }

    #[test]
    fn unknown_list_element_type() {
        let data = [0x0A, 0x00, 0x00, 0x09, 0x00, 0x00, 0x63, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert!(matches!(decode_slice(&data), Err(NbtError::Format(_))));
    }

    #[test]
    fn every_strict_prefix_fails() {
        for cut in 0..LITERAL.len() {
            let err = decode_slice(&LITERAL[..cut]).unwrap_err();
            assert!(
                matches!(err, NbtError::Truncated(_) | NbtError::Format(_)),
                "cut at {cut} gave {err:?}"
            );
        }
    }

    #[test]
    fn empty_end_list_is_allowed() {
        let data = [
            0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'e', 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let (_, root) = decode_slice(&data).unwrap();
        let list = root.get("e").and_then(Tag::as_list).unwrap();
        assert_eq!(list.element_kind(), TagKind::End);
        assert!(list.is_empty());
    }

    #[test]
    fn non_empty_end_list_is_rejected() {
        let data = [
            0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'e', 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
        ];
        assert!(matches!(decode_slice(&data), Err(NbtError::Format(_))));
    }

    #[test]
    fn high_bytes_decode_unsigned() {
        let data = [0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, b'b', 0xFF, 0x00];
        let (_, root) = decode_slice(&data).unwrap();
        assert_eq!(root.get("b"), Some(&Tag::Byte(255)));
    }

    #[test]
    fn decodes_arrays_and_strings() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x07, 0x00, 0x01, b'b', 0x00, 0x00, 0x00, 0x02, 0xDE, 0xAD, //
            0x0B, 0x00, 0x01, b'i', 0x00, 0x00, 0x00, 0x02, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
            0x00, 0x07, //
            0x08, 0x00, 0x01, b's', 0x00, 0x02, b'o', b'k', //
            0x00,
        ];
        let (_, root) = decode_slice(&data).unwrap();
        assert_eq!(root.get("b").and_then(Tag::as_byte_array), Some(&[0xDE, 0xAD][..]));
        assert_eq!(
            root.get("i").and_then(Tag::as_int_array).map(|a| a.as_slice()),
            Some(&[-1, 7][..])
        );
        assert_eq!(root.get("s").and_then(Tag::as_str), Some("ok"));
    }

    #[test]
    fn list_of_compounds() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x09, 0x00, 0x01, b'l', 0x0A, 0x00, 0x00, 0x00, 0x02, //
            0x02, 0x00, 0x01, b'x', 0x00, 0x05, 0x00, // {x: 5s}
            0x00, // {}
            0x00,
        ];
        let (_, root) = decode_slice(&data).unwrap();
        let list = root.get("l").and_then(Tag::as_list).unwrap();
        assert_eq!(list.len(), 2);
        let first = list.get(0).and_then(Tag::as_compound).unwrap();
        assert_eq!(first.get("x"), Some(&Tag::Short(5)));
        assert!(list.get(1).and_then(Tag::as_compound).unwrap().is_empty());
    }

    #[test]
    fn huge_declared_list_fails_fast() {
        let data = [
            0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'l', 0x03, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
        ];
        let err = decode_slice(&data).unwrap_err();
        assert!(err.is_truncated());
    }

    fn nested_compounds(depth: usize) -> Vec<u8> {
        let mut data = vec![0x0A, 0x00, 0x00];
        for _ in 0..depth {
            data.extend_from_slice(&[0x0A, 0x00, 0x00]);
        }
        data.extend(std::iter::repeat_n(0x00, depth + 1));
        data
    }

    #[test]
    fn decodes_deep_nesting_without_recursion() {
        let depth = 100_000;
        let (_, root) = decode_slice(&nested_compounds(depth)).unwrap();

        let mut seen = 0;
        let mut current = &root;
        while let Some(inner) = current.get("").and_then(Tag::as_compound) {
            seen += 1;
            current = inner;
        }
        assert_eq!(seen, depth);

        let mut expected = CompoundTag::new();
        for _ in 0..depth {
            let mut outer = CompoundTag::new();
            outer.insert("", expected).unwrap();
            expected = outer;
        }
        assert!(root == expected);
    }

    #[test]
    fn depth_limit() {
        let data = nested_compounds(3);
        assert!(Decoder::new().max_depth(4).decode(&data[..]).is_ok());
        let err = Decoder::new().max_depth(3).decode(&data[..]).unwrap_err();
        assert!(matches!(err, NbtError::Format(ref m) if m.contains("depth")));
    }

    #[test]
    fn small_preallocation_still_decodes() {
        let (_, root) = Decoder::new()
            .max_preallocation(0)
            .decode(LITERAL)
            .unwrap();
        assert_eq!(root.get("list").and_then(Tag::as_list).map(ListTag::len), Some(2));
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let data = [
            0x0A, 0x00, 0x00, //
            0x01, 0x00, 0x01, b'k', 0x01, //
            0x01, 0x00, 0x01, b'k', 0x02, //
            0x00,
        ];
        let (_, root) = decode_slice(&data).unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root.get("k"), Some(&Tag::Byte(2)));
    }

    #[test]
    fn validation_errors_are_reachable() {
        let mut list = ListTag::new(TagKind::Byte);
        let err: NbtError = list.push(Tag::Int(1)).unwrap_err().into();
        assert!(matches!(err, NbtError::Validation(ValidationError::WrongElementKind { .. })));
    }
}
