//! NBT encoding: `(CompoundTag, name)` → bytes.

use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{NbtError, ValidationError};
use crate::types::{CompoundTag, Tag, TagKind, code};

/// A container whose children are still being written.
enum Frame<'a> {
    Compound(indexmap::map::Iter<'a, String, Tag>),
    List(std::slice::Iter<'a, Tag>),
}

/// Encodes `root` as a document named `name` into the buffer.
///
/// Every tag in a tree is valid by construction, so the only possible
/// failure is a name longer than 65535 UTF-8 bytes.
pub fn encode_document(buf: &mut BytesMut, root: &CompoundTag, name: &str) -> Result<(), NbtError> {
    ValidationError::check_str_len(TagKind::String, name)?;
    encode_header(buf, TagKind::Compound, name);

    let mut stack = vec![Frame::Compound(root.iter())];
    while let Some(top) = stack.last_mut() {
        let next = match top {
            Frame::Compound(entries) => match entries.next() {
                Some((key, tag)) => {
                    encode_header(buf, tag.kind(), key);
                    tag
                }
                None => {
                    stack.pop();
                    buf.put_u8(code::END);
                    continue;
                }
            },
            // List elements carry no header; the list header already
            // declared their kind.
            Frame::List(items) => match items.next() {
                Some(tag) => tag,
                None => {
                    stack.pop();
                    continue;
                }
            },
        };
        if let Some(frame) = encode_payload(buf, next) {
            stack.push(frame);
        }
    }
    Ok(())
}

/// Writes a named tag header: type code, u16 name length, UTF-8 name.
fn encode_header(buf: &mut BytesMut, kind: TagKind, name: &str) {
    buf.put_u8(kind.code());
    buf.put_u16(name.len() as u16);
    buf.put_slice(name.as_bytes());
}

/// Writes a leaf payload, or a List header, returning a frame for containers.
fn encode_payload<'a>(buf: &mut BytesMut, tag: &'a Tag) -> Option<Frame<'a>> {
    match tag {
        Tag::Byte(b) => buf.put_slice(&b.to_be_bytes()),
        Tag::Short(s) => buf.put_i16(*s),
        Tag::Int(i) => buf.put_i32(*i),
        Tag::Long(l) => buf.put_i64(*l),
        Tag::Float(f) => buf.put_f32(*f),
        Tag::Double(d) => buf.put_f64(*d),
        Tag::ByteArray(b) => {
            buf.put_u32(b.len() as u32);
            buf.put_slice(b.as_slice());
        }
        Tag::String(s) => {
            buf.put_u16(s.as_str().len() as u16);
            buf.put_slice(s.as_str().as_bytes());
        }
        Tag::IntArray(a) => {
            buf.put_u32(a.len() as u32);
            for v in a.iter() {
                buf.put_i32(v);
            }
        }
        Tag::List(l) => {
            buf.put_u8(l.element_kind().code());
            buf.put_u32(l.len() as u32);
            return Some(Frame::List(l.iter()));
        }
        Tag::Compound(c) => return Some(Frame::Compound(c.iter())),
    }
    None
}

/// Encodes a document into a new immutable buffer.
pub fn encode_to_bytes(root: &CompoundTag, name: &str) -> Result<Bytes, NbtError> {
    let mut buf = BytesMut::new();
    encode_document(&mut buf, root, name)?;
    Ok(buf.freeze())
}

/// Encodes a document and writes it to `writer` in a single `write_all`.
///
/// Nothing is written if encoding fails.
pub fn write_document<W: Write>(
    mut writer: W,
    root: &CompoundTag,
    name: &str,
) -> Result<(), NbtError> {
    let data = encode_to_bytes(root, name)?;
    writer.write_all(&data)?;
    tracing::debug!(
        name = %name,
        entries = root.len(),
        bytes = data.len(),
        "encoded NBT document"
    );
    Ok(())
}
