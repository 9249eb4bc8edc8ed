//! Error type shared by every decoding, persistence and C-boundary path.
//!
//! [`ZlibError`] carries the precise failure; [`ErrorKind`] folds it onto the
//! three categories a C caller can act on (bad input, out of memory, I/O),
//! and [`ZlibError::code`] gives the integer reported by `rzlib_last_error`.

use std::fmt;
use std::io;
use std::os::raw::c_int;
use std::path::PathBuf;

// ── Error codes reported through the C ABI ───────────────────────────────────
pub const RZLIB_OK: c_int = 0;
pub const RZLIB_INVALID_INPUT: c_int = -1;
pub const RZLIB_ALLOCATION_FAILURE: c_int = -2;
pub const RZLIB_IO_FAILURE: c_int = -3;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Null/negative arguments, or a byte stream that is not valid
    /// zlib/gzip data.
    InvalidInput,
    /// The heap could not satisfy an output allocation.
    AllocationFailure,
    /// Writing the decompressed bytes to the requested directory failed.
    IoFailure,
}

impl ErrorKind {
    /// Integer code used at the C boundary.
    pub fn code(self) -> c_int {
        match self {
            ErrorKind::InvalidInput => RZLIB_INVALID_INPUT,
            ErrorKind::AllocationFailure => RZLIB_ALLOCATION_FAILURE,
            ErrorKind::IoFailure => RZLIB_IO_FAILURE,
        }
    }
}

/// Everything that can go wrong while decompressing or persisting output.
#[derive(Debug)]
pub enum ZlibError {
    /// Input pointer was null while the length was positive.
    NullInput,
    /// Input length was negative.
    NegativeLength(i64),
    /// A required output pointer was null.
    NullOutputLength,
    /// The stream ended before the end-of-stream marker or trailer.
    Truncated,
    /// Container header is malformed or uses an unsupported feature.
    BadHeader(String),
    /// The compressed body is not valid DEFLATE data.
    Corrupt(String),
    /// Trailer checksum does not match the decompressed bytes.
    ChecksumMismatch { expected: u32, actual: u32 },
    /// gzip ISIZE field does not match the decompressed length (mod 2^32).
    LengthMismatch { expected: u32, actual: u32 },
    /// Unconsumed bytes follow the end of the last stream.
    TrailingData(usize),
    /// Decompressed output would exceed the configured limit.
    OutputLimitExceeded(usize),
    /// An allocation of the given size failed.
    Allocation(usize),
    /// Persistence target is missing or not a directory.
    NotADirectory(PathBuf),
    /// Stored/derived output file name is unusable.
    InvalidFileName(String),
    /// Underlying filesystem error.
    Io(io::Error),
}

impl ZlibError {
    /// Folds the error onto the three-way taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZlibError::Allocation(_) => ErrorKind::AllocationFailure,
            ZlibError::NotADirectory(_) | ZlibError::InvalidFileName(_) | ZlibError::Io(_) => {
                ErrorKind::IoFailure
            }
            _ => ErrorKind::InvalidInput,
        }
    }

    /// C-boundary error code for this error.
    pub fn code(&self) -> c_int {
        self.kind().code()
    }
}

impl fmt::Display for ZlibError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZlibError::NullInput => write!(f, "input pointer is null"),
            ZlibError::NegativeLength(n) => write!(f, "negative input length: {}", n),
            ZlibError::NullOutputLength => write!(f, "output length pointer is null"),
            ZlibError::Truncated => write!(f, "truncated stream"),
            ZlibError::BadHeader(msg) => write!(f, "bad header: {}", msg),
            ZlibError::Corrupt(msg) => write!(f, "corrupt deflate data: {}", msg),
            ZlibError::ChecksumMismatch { expected, actual } => write!(
                f,
                "checksum mismatch: expected 0x{:08x}, got 0x{:08x}",
                expected, actual
            ),
            ZlibError::LengthMismatch { expected, actual } => write!(
                f,
                "length mismatch: trailer says {}, decoded {}",
                expected, actual
            ),
            ZlibError::TrailingData(n) => write!(f, "{} trailing bytes after end of stream", n),
            ZlibError::OutputLimitExceeded(limit) => {
                write!(f, "decompressed size exceeds limit of {} bytes", limit)
            }
            ZlibError::Allocation(n) => write!(f, "failed to allocate {} bytes", n),
            ZlibError::NotADirectory(p) => write!(f, "{}: not a directory", p.display()),
            ZlibError::InvalidFileName(name) => write!(f, "invalid output file name: {:?}", name),
            ZlibError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ZlibError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ZlibError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ZlibError {
    fn from(error: io::Error) -> Self {
        ZlibError::Io(error)
    }
}

/// Converts into an `io::Error` so the file-level layer can propagate with `?`.
impl From<ZlibError> for io::Error {
    fn from(error: ZlibError) -> Self {
        match error {
            ZlibError::Io(e) => e,
            other => {
                let kind = match other.kind() {
                    ErrorKind::AllocationFailure => io::ErrorKind::OutOfMemory,
                    _ => io::ErrorKind::InvalidData,
                };
                io::Error::new(kind, other.to_string())
            }
        }
    }
}
