//! Container detection and dispatch.

use crate::error::ZlibError;
use crate::gzip::header::GZIP_MAGIC;
use crate::types::{Decompressed, Format, Options};
use crate::{gzip, zlib};

/// Identifies the container from the leading bytes of `input`.
///
/// gzip is recognised by its magic; zlib by a valid two-byte header. The two
/// cannot collide: 0x1f has compression method 15, which zlib rejects.
pub fn detect(input: &[u8]) -> Option<Format> {
    if input.starts_with(&GZIP_MAGIC) {
        Some(Format::Gzip)
    } else if zlib::parse_header(input).is_ok() {
        Some(Format::Zlib)
    } else {
        None
    }
}

/// Decodes `input` as the given container.
pub fn decompress_as(
    format: Format,
    input: &[u8],
    opts: &Options,
) -> Result<Decompressed, ZlibError> {
    match format {
        Format::Zlib => zlib::decompress_with(input, opts),
        Format::Gzip => gzip::decompress_with(input, opts),
    }
}

/// Detects the container, then decodes.
pub fn decompress_auto(input: &[u8], opts: &Options) -> Result<Decompressed, ZlibError> {
    if input.len() < 2 {
        return Err(ZlibError::Truncated);
    }
    let format = detect(input)
        .ok_or_else(|| ZlibError::BadHeader("neither a zlib nor a gzip stream".into()))?;
    decompress_as(format, input, opts)
}
