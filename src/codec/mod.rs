//! NBT binary encoding and decoding.
//!
//! NBT is a big-endian, tagged tree format. A document is a single named
//! Compound; Compound entries are `type, name, payload` triples closed by an
//! End byte, and List elements are bare payloads of one declared kind.

pub mod decode;
pub mod encode;
pub mod reader;

pub use decode::{Decoder, decode_buf, decode_document, decode_slice};
pub use encode::{encode_document, encode_to_bytes, write_document};
pub use reader::TagReader;
