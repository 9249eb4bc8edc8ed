//! zlib container (RFC 1950): two-byte header, raw DEFLATE body, big-endian
//! Adler-32 trailer.
//!
//! The header is validated here so unsupported streams get a precise error;
//! the whole stream is then inflated by `flate2` in zlib mode, which checks
//! the trailer.

use crate::checksum::adler32;
use crate::config::ZLIB_MIN_LEN;
use crate::displaylevel;
use crate::error::ZlibError;
use crate::inflate::{output_buffer, Inflater};
use crate::types::{Decompressed, Format, Options};

pub const ZLIB_HEADER_LEN: usize = 2;
pub const ZLIB_TRAILER_LEN: usize = 4;

/// CM value for DEFLATE.
const CM_DEFLATE: u8 = 8;
/// FLG bit signalling a preset dictionary id after the header.
const FDICT: u8 = 0x20;

/// Parsed zlib header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZlibHeader {
    /// LZ77 window size in bytes (256 << CINFO).
    pub window_size: usize,
    /// FLEVEL hint: 0 fastest … 3 maximum compression.
    pub level: u8,
}

/// Validates and decodes the two header bytes at the front of `input`.
pub fn parse_header(input: &[u8]) -> Result<ZlibHeader, ZlibError> {
    let (cmf, flg) = match input {
        [cmf, flg, ..] => (*cmf, *flg),
        _ => return Err(ZlibError::Truncated),
    };
    if cmf & 0x0f != CM_DEFLATE {
        return Err(ZlibError::BadHeader(format!(
            "unsupported compression method {}",
            cmf & 0x0f
        )));
    }
    let cinfo = cmf >> 4;
    if cinfo > 7 {
        return Err(ZlibError::BadHeader(format!("window size 2^{} too large", cinfo + 8)));
    }
    if (u16::from(cmf) << 8 | u16::from(flg)) % 31 != 0 {
        return Err(ZlibError::BadHeader("header check bits do not match".into()));
    }
    if flg & FDICT != 0 {
        return Err(ZlibError::BadHeader("preset dictionary not supported".into()));
    }
    Ok(ZlibHeader {
        window_size: 256 << cinfo,
        level: flg >> 6,
    })
}

/// Decodes one zlib stream from `input`.
pub fn decompress_with(input: &[u8], opts: &Options) -> Result<Decompressed, ZlibError> {
    let header = parse_header(input)?;
    if input.len() < ZLIB_MIN_LEN {
        return Err(ZlibError::Truncated);
    }
    displaylevel!(
        5,
        "zlib: window {} bytes, level hint {}\n",
        header.window_size,
        header.level
    );

    let mut out = output_buffer(input.len(), opts)?;
    let stream_len = match Inflater::zlib().inflate_into(input, &mut out, opts.limit()) {
        Ok(len) => len,
        Err(ZlibError::Corrupt(msg)) => return Err(classify_corrupt(input, opts, msg)),
        Err(e) => return Err(e),
    };
    let expected = trailer_at(input, stream_len).ok_or(ZlibError::Truncated)?;

    let mut consumed = stream_len;
    let trailing = input.len() - consumed;
    if trailing > 0 {
        if !opts.allow_trailing_data {
            return Err(ZlibError::TrailingData(trailing));
        }
        displaylevel!(4, "zlib: ignoring {} trailing bytes\n", trailing);
        consumed = input.len();
    }

    Ok(Decompressed {
        data: out,
        format: Format::Zlib,
        checksum: expected,
        header: None,
        consumed,
    })
}

/// Big-endian Adler-32 in the four bytes ending at `stream_end`.
fn trailer_at(input: &[u8], stream_end: usize) -> Option<u32> {
    let start = stream_end.checked_sub(ZLIB_TRAILER_LEN)?;
    let t = input.get(start..stream_end)?;
    Some(u32::from_be_bytes([t[0], t[1], t[2], t[3]]))
}

/// Tells a bad Adler-32 trailer apart from a bad DEFLATE body.
///
/// `flate2` reports both as a data error. Only on that path, the body is
/// re-inflated raw: if it decodes cleanly the trailer was at fault.
fn classify_corrupt(input: &[u8], opts: &Options, msg: String) -> ZlibError {
    let mut body_out = Vec::new();
    let body = &input[ZLIB_HEADER_LEN..];
    let Ok(body_len) = Inflater::raw().inflate_into(body, &mut body_out, opts.limit()) else {
        return ZlibError::Corrupt(msg);
    };
    match trailer_at(input, ZLIB_HEADER_LEN + body_len + ZLIB_TRAILER_LEN) {
        Some(expected) => ZlibError::ChecksumMismatch {
            expected,
            actual: adler32(&body_out),
        },
        None => ZlibError::Corrupt(msg),
    }
}
