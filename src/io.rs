//! File-level decompression used by the `rzlib` binary.
//!
//! The library decoders work on in-memory buffers; this module adds sources
//! and destinations, overwrite policy, metadata copy, multi-file dispatch and
//! the `--list` table.

pub mod decompress_dispatch;
pub mod file_info;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use decompress_dispatch::DecompressStats;
pub use file_info::CompressedFileInfo;
pub use prefs::Prefs;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Worker count ──────────────────────────────────────────────────────────────
pub use prefs::default_nb_workers;

// ── Decompression ────────────────────────────────────────────────────────────
pub use decompress_dispatch::{
    decompress_filename, decompress_multiple_filenames, has_compressed_suffix,
    output_filename_for,
};

// ── File info / --list ───────────────────────────────────────────────────────
pub use file_info::{display_compressed_files_info, get_compressed_file_info};
