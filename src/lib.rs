//! nbtr — a pure-Rust NBT (named binary tag) encoder and decoder.
//!
//! NBT is a big-endian binary tree format: a document is one named Compound
//! holding typed values, Lists, and nested Compounds.
//!
//! # Architecture
//!
//! - **`types`** — the `Tag` sum type, `ListTag`/`CompoundTag` containers, and
//!   the `TagKind` type-code registry
//! - **`codec`** — iterative decoder and encoder (explicit frame stacks, no
//!   recursion, so nesting depth is bounded by memory only)
//! - **`file`** — path-based helpers, with gzip behind the `gzip` feature
//! - **`error`** — `NbtError` and `ValidationError`
//!
//! ```
//! use nbtr::{CompoundTag, ListTag, Tag, TagKind};
//!
//! let mut root = CompoundTag::new();
//! root.insert("a", 42i32)?;
//! root.insert("list", ListTag::with_items(TagKind::Byte, [Tag::Byte(1), Tag::Byte(2)])?)?;
//!
//! let data = nbtr::encode_to_bytes(&root, "")?;
//! let (name, decoded) = nbtr::decode_slice(&data)?;
//! assert_eq!(name, "");
//! assert_eq!(decoded, root);
//! # Ok::<(), nbtr::NbtError>(())
//! ```

pub mod codec;
pub mod error;
pub mod file;
pub mod types;

use std::io::{Read, Write};

pub use codec::{Decoder, decode_buf, decode_slice, encode_to_bytes};
pub use error::{NbtError, ValidationError};
pub use types::{
    BYTE_MAX, BYTE_MIN, ByteArrayTag, ByteRepr, CompoundTag, IntArrayTag, ListTag, StringTag, Tag,
    TagKind,
};

/// Decodes one document from `reader`, returning its name and root Compound.
pub fn decode<R: Read>(reader: R) -> Result<(String, CompoundTag), NbtError> {
    codec::decode_document(reader)
}

/// Encodes `root` as a document named `name` and writes it to `writer`.
pub fn encode<W: Write>(writer: W, root: &CompoundTag, name: &str) -> Result<(), NbtError> {
    codec::write_document(writer, root, name)
}
