//! gzip member header (RFC 1952 §2.3).
//!
//! ```text
//! +---+---+---+---+---+---+---+---+---+---+
//! |ID1|ID2|CM |FLG|     MTIME     |XFL|OS |
//! +---+---+---+---+---+---+---+---+---+---+
//! (if FEXTRA) XLEN(2) + XLEN bytes
//! (if FNAME)  zero-terminated ISO-8859-1 file name
//! (if FCOMMENT) zero-terminated ISO-8859-1 comment
//! (if FHCRC)  CRC16 = low half of the CRC-32 of all preceding header bytes
//! ```

use crate::checksum::crc32;
use crate::error::ZlibError;

pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
pub const GZIP_FIXED_HEADER_LEN: usize = 10;

const CM_DEFLATE: u8 = 8;

pub const FTEXT: u8 = 0x01;
pub const FHCRC: u8 = 0x02;
pub const FEXTRA: u8 = 0x04;
pub const FNAME: u8 = 0x08;
pub const FCOMMENT: u8 = 0x10;
const FRESERVED: u8 = 0xe0;

/// Fields of one gzip member header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GzHeader {
    pub compression_method: u8,
    pub flags: u8,
    /// Modification time of the original file, seconds since the epoch;
    /// 0 means "not available".
    pub mtime: u32,
    pub extra_flags: u8,
    pub os: u8,
    pub extra: Option<Vec<u8>>,
    pub file_name: Option<String>,
    pub comment: Option<String>,
    /// Total header length in bytes, i.e. offset of the DEFLATE body.
    pub header_len: usize,
}

impl GzHeader {
    pub fn is_text(&self) -> bool {
        self.flags & FTEXT != 0
    }
}

/// Cursor over the header bytes; running off the end is a truncation.
struct HeaderReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn byte(&mut self) -> Result<u8, ZlibError> {
        let b = *self.buf.get(self.pos).ok_or(ZlibError::Truncated)?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ZlibError> {
        let end = self.pos.checked_add(n).ok_or(ZlibError::Truncated)?;
        let bytes = self.buf.get(self.pos..end).ok_or(ZlibError::Truncated)?;
        self.pos = end;
        Ok(bytes)
    }

    fn u16_le(&mut self) -> Result<u16, ZlibError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32_le(&mut self) -> Result<u32, ZlibError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Zero-terminated ISO-8859-1 string; the terminator is consumed.
    fn latin1_string(&mut self) -> Result<String, ZlibError> {
        let rest = &self.buf[self.pos..];
        let nul = rest.iter().position(|&b| b == 0).ok_or(ZlibError::Truncated)?;
        self.pos += nul + 1;
        Ok(rest[..nul].iter().map(|&b| char::from(b)).collect())
    }
}

/// Parses the gzip header at the front of `buffer`.
pub fn parse_header(buffer: &[u8]) -> Result<GzHeader, ZlibError> {
    let mut r = HeaderReader { buf: buffer, pos: 0 };

    let id = [r.byte()?, r.byte()?];
    if id != GZIP_MAGIC {
        return Err(ZlibError::BadHeader(format!(
            "not a gzip member (magic {:02x} {:02x})",
            id[0], id[1]
        )));
    }
    let compression_method = r.byte()?;
    if compression_method != CM_DEFLATE {
        return Err(ZlibError::BadHeader(format!(
            "unsupported compression method {}",
            compression_method
        )));
    }
    let flags = r.byte()?;
    if flags & FRESERVED != 0 {
        return Err(ZlibError::BadHeader(format!("reserved flag bits set: 0x{:02x}", flags)));
    }
    let mtime = r.u32_le()?;
    let extra_flags = r.byte()?;
    let os = r.byte()?;

    let extra = if flags & FEXTRA != 0 {
        let xlen = r.u16_le()? as usize;
        Some(r.take(xlen)?.to_vec())
    } else {
        None
    };
    let file_name = if flags & FNAME != 0 { Some(r.latin1_string()?) } else { None };
    let comment = if flags & FCOMMENT != 0 { Some(r.latin1_string()?) } else { None };

    if flags & FHCRC != 0 {
        let covered = r.pos;
        let stored = r.u16_le()?;
        let actual = (crc32(&buffer[..covered]) & 0xffff) as u16;
        if stored != actual {
            return Err(ZlibError::ChecksumMismatch {
                expected: u32::from(stored),
                actual: u32::from(actual),
            });
        }
    }

    Ok(GzHeader {
        compression_method,
        flags,
        mtime,
        extra_flags,
        os,
        extra,
        file_name,
        comment,
        header_len: r.pos,
    })
}
