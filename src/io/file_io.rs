//! File I/O primitives for the CLI pipeline.
//!
//! - [`read_src_file`]: slurps a path (or the `"stdin"` sentinel) into
//!   memory; the decoders work on whole buffers.
//! - [`open_dst_file`]: resolves a path string to a [`DstFile`], handling
//!   the `"stdout"` and null-device sentinels and enforcing the overwrite
//!   policy from [`Prefs`].
//!
//! Sentinel string constants ([`STDIN_MARK`], [`STDOUT_MARK`], [`NUL_MARK`])
//! are exported so callers can compare against them without embedding magic
//! strings.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use crate::cli::constants::display_level;
use crate::io::prefs::Prefs;
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

#[inline]
pub(crate) fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK || s == "-"
}

#[inline]
pub(crate) fn is_special_dst(s: &str) -> bool {
    s == STDOUT_MARK || s == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Reads a whole source into memory.
///
/// `"stdin"` and `"-"` read standard input; directories are rejected with
/// [`io::ErrorKind::InvalidInput`].
pub fn read_src_file(path: &str) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_stdin(path) {
        crate::displaylevel!(4, "Using stdin for input\n");
        io::stdin().lock().read_to_end(&mut data)?;
        return Ok(data);
    }

    if is_directory(Path::new(path)) {
        crate::displaylevel!(1, "rzlib: {} is a directory -- ignored\n", path);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let mut f = File::open(path).map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path, e)))?;
    if let Ok(meta) = f.metadata() {
        data.reserve(meta.len() as usize);
    }
    f.read_to_end(&mut data)?;
    Ok(data)
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
///
/// Wraps a buffered regular file, stdout, or a discard sink.
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// Sentinels are resolved before touching the filesystem: `"stdout"` is
/// standard output and [`NUL_MARK`] discards everything without creating a
/// file.
///
/// When `prefs.overwrite` is false and `path` exists, the user is asked on
/// stderr if stdin is a terminal and the display level allows it; otherwise
/// the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if path == STDOUT_MARK {
        crate::displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile {
            inner: Box::new(io::stdout().lock()),
            is_stdout: true,
        });
    }

    if path == NUL_MARK {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
        });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        if display_level() <= 1 || !io::stdin().is_terminal() {
            crate::displaylevel!(1, "{} already exists; not overwritten  \n", path);
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: already exists; not overwritten", path),
            ));
        }
        eprint!("{} already exists; do you want to overwrite (y/N) ? ", path);
        let _ = io::stderr().flush();
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let first = line.trim_start().chars().next().unwrap_or('\0');
        if first != 'y' && first != 'Y' {
            eprintln!("    not overwritten  ");
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: not overwritten", path),
            ));
        }
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path, e)))?;

    Ok(DstFile {
        inner: Box::new(BufWriter::new(f)),
        is_stdout: false,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
