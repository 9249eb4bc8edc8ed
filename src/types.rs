//! Value types shared by the decoders, the persistence layer and the C ABI.

use crate::gzip::header::GzHeader;

/// Container format of a compressed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RFC 1950: 2-byte header, DEFLATE body, big-endian Adler-32 trailer.
    Zlib,
    /// RFC 1952: variable header, DEFLATE body, CRC-32 + ISIZE trailer.
    Gzip,
}

impl Format {
    /// Human-readable name, used by `--list`.
    pub fn name(self) -> &'static str {
        match self {
            Format::Zlib => "zlib",
            Format::Gzip => "gzip",
        }
    }
}

/// Decoding options.
///
/// The default decodes without an output cap, rejects trailing bytes and
/// seeds the output buffer from the compressed length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Hard cap on the decompressed size in bytes.
    pub max_output: Option<usize>,
    /// Ignore bytes following the last complete stream instead of failing.
    pub allow_trailing_data: bool,
    /// Initial output capacity; `None` derives it from the input length.
    pub initial_capacity: Option<usize>,
}

impl Options {
    pub fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = Some(limit);
        self
    }

    pub fn with_trailing_data(mut self, allow: bool) -> Self {
        self.allow_trailing_data = allow;
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Effective output limit (`usize::MAX` when uncapped).
    pub(crate) fn limit(&self) -> usize {
        self.max_output.unwrap_or(usize::MAX)
    }
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    /// Decompressed bytes; `data.len()` is the exact output length.
    pub data: Vec<u8>,
    pub format: Format,
    /// Trailer checksum of the stream: Adler-32 for zlib, CRC-32 of the last
    /// member for gzip.
    pub checksum: u32,
    /// Header of the first gzip member.
    pub header: Option<GzHeader>,
    /// Number of input bytes consumed, including ignored trailing bytes.
    pub consumed: usize,
}

impl Decompressed {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
