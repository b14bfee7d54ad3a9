//! Path-based helpers for reading and writing NBT files.
//!
//! These own the file handles (and, with the `gzip` feature, the gzip
//! codec) and close them on every exit path; the codec itself only sees a
//! `Read` or `Write`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::codec::{decode_document, encode_to_bytes};
use crate::error::NbtError;
use crate::types::CompoundTag;

/// Reads an uncompressed NBT file.
pub fn read_file(path: impl AsRef<Path>) -> Result<(String, CompoundTag), NbtError> {
    let path = path.as_ref();
    let result = File::open(path)
        .map_err(NbtError::from)
        .and_then(|f| decode_document(BufReader::new(f)));
    log_read(path, result)
}

/// Writes an uncompressed NBT file, replacing any existing file.
pub fn write_file(path: impl AsRef<Path>, root: &CompoundTag, name: &str) -> Result<(), NbtError> {
    let path = path.as_ref();
    let result = encode_to_bytes(root, name).and_then(|data| {
        let mut out = BufWriter::new(File::create(path)?);
        out.write_all(&data)?;
        out.flush()?;
        Ok(data.len())
    });
    log_write(path, result)
}

/// Reads a gzip-compressed NBT file.
#[cfg(feature = "gzip")]
pub fn read_compressed_file(path: impl AsRef<Path>) -> Result<(String, CompoundTag), NbtError> {
    use flate2::read::GzDecoder;

    let path = path.as_ref();
    let result = File::open(path)
        .map_err(NbtError::from)
        .and_then(|f| decode_document(GzDecoder::new(BufReader::new(f))));
    log_read(path, result)
}

/// Writes a gzip-compressed NBT file, replacing any existing file.
#[cfg(feature = "gzip")]
pub fn write_compressed_file(
    path: impl AsRef<Path>,
    root: &CompoundTag,
    name: &str,
) -> Result<(), NbtError> {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let path = path.as_ref();
    let result = encode_to_bytes(root, name).and_then(|data| {
        let file = BufWriter::new(File::create(path)?);
        let mut gz = GzEncoder::new(file, Compression::default());
        gz.write_all(&data)?;
        gz.finish()?.flush()?;
        Ok(data.len())
    });
    log_write(path, result)
}

fn log_read(
    path: &Path,
    result: Result<(String, CompoundTag), NbtError>,
) -> Result<(String, CompoundTag), NbtError> {
    match &result {
        Ok((name, _)) => tracing::debug!(path = %path.display(), name = %name, "read NBT file"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to read NBT file"),
    }
    result
}

fn log_write(path: &Path, result: Result<usize, NbtError>) -> Result<(), NbtError> {
    match result {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), bytes, "wrote NBT file");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to write NBT file");
            Err(e)
        }
    }
}
