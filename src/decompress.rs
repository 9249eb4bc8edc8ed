//! Public decompression entry points.
//!
//! The pure transforms (`decompress_*`) never touch the filesystem;
//! [`decompress_to_dir`] composes a transform with
//! [`persist::write_to_dir`] and is the only place the two meet on the Rust
//! side.

use std::path::{Path, PathBuf};

use crate::error::ZlibError;
use crate::format::{decompress_as, decompress_auto};
use crate::persist::{output_file_name, write_to_dir};
use crate::types::{Decompressed, Format, Options};
use crate::{gzip, zlib};

/// Decompresses a zlib stream into a new buffer.
pub fn decompress_zlib(input: &[u8]) -> Result<Vec<u8>, ZlibError> {
    zlib::decompress_with(input, &Options::default()).map(Decompressed::into_vec)
}

/// Decompresses a zlib stream with explicit options.
pub fn decompress_zlib_with(input: &[u8], opts: &Options) -> Result<Decompressed, ZlibError> {
    zlib::decompress_with(input, opts)
}

/// Decompresses all members of a gzip file into a new buffer.
pub fn decompress_gzip(input: &[u8]) -> Result<Vec<u8>, ZlibError> {
    gzip::decompress_with(input, &Options::default()).map(Decompressed::into_vec)
}

/// Decompresses a gzip file with explicit options.
pub fn decompress_gzip_with(input: &[u8], opts: &Options) -> Result<Decompressed, ZlibError> {
    gzip::decompress_with(input, opts)
}

/// Decompresses `input` and writes the result under `dir`.
///
/// `format` of `None` detects the container. The file is named by
/// [`output_file_name`]; nothing is written unless decoding succeeds.
pub fn decompress_to_dir(
    input: &[u8],
    format: Option<Format>,
    dir: &Path,
    opts: &Options,
) -> Result<(Decompressed, PathBuf), ZlibError> {
    let decoded = match format {
        Some(format) => decompress_as(format, input, opts)?,
        None => decompress_auto(input, opts)?,
    };
    let name = output_file_name(&decoded)?;
    let path = write_to_dir(dir, &name, &decoded.data)?;
    Ok((decoded, path))
}
