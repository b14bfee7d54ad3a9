//! Exact-length reads over a blocking byte stream.

use std::io::{self, Read};

use crate::error::NbtError;
use crate::types::{ByteRepr, TagKind};

/// Wraps a `Read` so every read either fills its field completely or fails.
///
/// A stream that ends early yields [`NbtError::Truncated`] naming the field
/// being read; any other I/O failure is passed through as [`NbtError::Io`].
pub struct TagReader<R> {
    reader: R,
    position: u64,
}

impl<R: Read> TagReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], NbtError> {
        let mut data = [0u8; N];
        self.reader.read_exact(&mut data).map_err(|e| eof_as_truncated(e, what))?;
        self.position += N as u64;
        Ok(data)
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8, NbtError> {
        Ok(self.fill::<1>(what)?[0])
    }

    /// Reads a Byte tag payload in its storage representation.
    pub fn read_byte(&mut self, what: &'static str) -> Result<ByteRepr, NbtError> {
        self.fill(what).map(ByteRepr::from_be_bytes)
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16, NbtError> {
        self.fill(what).map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32, NbtError> {
        self.fill(what).map(u32::from_be_bytes)
    }

    pub fn read_i16(&mut self, what: &'static str) -> Result<i16, NbtError> {
        self.fill(what).map(i16::from_be_bytes)
    }

    pub fn read_i32(&mut self, what: &'static str) -> Result<i32, NbtError> {
        self.fill(what).map(i32::from_be_bytes)
    }

    pub fn read_i64(&mut self, what: &'static str) -> Result<i64, NbtError> {
        self.fill(what).map(i64::from_be_bytes)
    }

    pub fn read_f32(&mut self, what: &'static str) -> Result<f32, NbtError> {
        self.fill(what).map(f32::from_be_bytes)
    }

    pub fn read_f64(&mut self, what: &'static str) -> Result<f64, NbtError> {
        self.fill(what).map(f64::from_be_bytes)
    }

    /// Reads exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, so a bogus length prefix
    /// fails with `Truncated` instead of reserving `len` bytes up front.
    pub fn read_bytes(&mut self, len: u64, what: &'static str) -> Result<Vec<u8>, NbtError> {
        let mut data = Vec::new();
        let read = self
            .reader
            .by_ref()
            .take(len)
            .read_to_end(&mut data)
            .map_err(|e| eof_as_truncated(e, what))?;
        self.position += read as u64;
        if (read as u64) < len {
            return Err(NbtError::Truncated(what));
        }
        Ok(data)
    }

    /// Reads a u16-length-prefixed UTF-8 string.
    pub fn read_string(&mut self, what: &'static str) -> Result<String, NbtError> {
        let len = self.read_u16(what)?;
        let data = self.read_bytes(len.into(), what)?;
        String::from_utf8(data)
            .map_err(|e| NbtError::format(format!("invalid UTF-8 in {what}: {e}")))
    }

    pub fn read_kind(&mut self, what: &'static str) -> Result<TagKind, NbtError> {
        TagKind::try_from(self.read_u8(what)?)
    }

    /// Reads a named tag header.
    ///
    /// Returns `None` for an End marker, which carries no name.
    pub fn read_header(&mut self) -> Result<Option<(TagKind, String)>, NbtError> {
        let kind = self.read_kind("tag type")?;
        if kind == TagKind::End {
            return Ok(None);
        }
        let name = self.read_string("tag name")?;
        Ok(Some((kind, name)))
    }
}

fn eof_as_truncated(e: io::Error, what: &'static str) -> NbtError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        NbtError::Truncated(what)
    } else {
        NbtError::Io(e)
    }
}
