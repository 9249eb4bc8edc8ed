// rzlib: zlib/gzip decompression to heap-owned buffers

pub mod config;
pub mod error;
pub mod types;
pub mod checksum;
pub mod inflate;
pub mod zlib;
pub mod gzip;
pub mod format;
pub mod persist;
pub mod heap;
pub mod decompress;
pub mod abi;
pub mod util;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const RZLIB_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");
/// NUL-terminated copy of [`RZLIB_VERSION_STRING`] for the C ABI.
pub const RZLIB_VERSION_CSTR: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Returns the library version string.
pub fn version_string() -> &'static str {
    RZLIB_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use decompress::{
    decompress_gzip, decompress_gzip_with, decompress_to_dir, decompress_zlib,
    decompress_zlib_with,
};
pub use error::{ErrorKind, ZlibError};
pub use format::{decompress_as, decompress_auto, detect};
pub use gzip::header::GzHeader;
pub use heap::HeapBuffer;
pub use types::{Decompressed, Format, Options};
