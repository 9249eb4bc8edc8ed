//! File-level decompression dispatch.
//!
//! [`decompress_filename`] decodes one source into one destination;
//! [`decompress_multiple_filenames`] derives destinations from source names
//! and fans the work out over a `rayon` pool when more than one worker is
//! configured. Sources are read whole and decoded in memory, so a failed
//! decode never leaves a partial destination behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rayon::prelude::*;

use crate::cli::constants::KNOWN_SUFFIXES;
use crate::error::ZlibError;
use crate::format::{decompress_as, decompress_auto};
use crate::io::file_io::{
    is_special_dst, is_stdin, open_dst_file, read_src_file, NUL_MARK, STDOUT_MARK,
};
use crate::io::prefs::Prefs;
use crate::persist::{output_file_name, sanitize_file_name, write_to_dir};
use crate::types::{Decompressed, Format};
use crate::util::{file_mode, is_reg_file, set_file_stat};

/// Outcome of a single successful file decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompressStats {
    pub format: Format,
    pub compressed_bytes: u64,
    pub decompressed_bytes: u64,
    /// Regular file written, if any (`None` for stdout, discard and test mode).
    pub dst: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Name derivation
// ---------------------------------------------------------------------------

/// Derives an output name by stripping a known compressed suffix.
///
/// `.tgz` becomes `.tar`. Returns `None` when `src` carries no known suffix
/// or nothing would remain of its base name.
pub fn output_filename_for(src: &str) -> Option<String> {
    KNOWN_SUFFIXES.iter().find_map(|(suffix, replacement)| {
        let stem = src.strip_suffix(suffix)?;
        if stem.is_empty() || stem.ends_with(['/', '\\']) {
            return None;
        }
        Some(format!("{}{}", stem, replacement))
    })
}

/// Returns `true` when `path` ends with one of the known compressed suffixes.
pub fn has_compressed_suffix(path: &Path) -> bool {
    path.to_str().is_some_and(|p| output_filename_for(p).is_some())
}

/// Destination named after the gzip stored name, next to the source.
fn stored_name_dst(src: &str, decoded: &Decompressed) -> Result<Option<PathBuf>, ZlibError> {
    let Some(stored) = decoded.header.as_ref().and_then(|h| h.file_name.as_deref()) else {
        return Ok(None);
    };
    let name = sanitize_file_name(stored)?;
    let dir = if is_stdin(src) {
        PathBuf::from(".")
    } else {
        Path::new(src).parent().map(Path::to_path_buf).unwrap_or_default()
    };
    Ok(Some(dir.join(name)))
}

// ---------------------------------------------------------------------------
// Single file
// ---------------------------------------------------------------------------

fn to_io_error(src: &str, err: ZlibError) -> io::Error {
    let msg = format!("{}: {}", src, err);
    io::Error::new(io::Error::from(err).kind(), msg)
}

fn decode(src: &str, data: &[u8], prefs: &Prefs) -> io::Result<Decompressed> {
    let result = match prefs.format {
        Some(format) => decompress_as(format, data, &prefs.options),
        None => decompress_auto(data, &prefs.options),
    };
    result.map_err(|e| to_io_error(src, e))
}

/// Copies source timestamps and permissions onto `dst`.
///
/// With `-N` a non-zero gzip MTIME takes precedence over the source mtime.
/// Failures are reported at verbosity 2 and otherwise ignored.
fn copy_file_stat(src: &str, dst: &Path, decoded: &Decompressed, prefs: &Prefs) {
    let src_meta = if is_stdin(src) { None } else { fs::metadata(src).ok() };
    let stored = stored_mtime(decoded).filter(|_| prefs.use_stored_name);
    let mtime = stored.or_else(|| src_meta.as_ref().and_then(|m| m.modified().ok()));
    let mode = src_meta.as_ref().map(file_mode);
    let (Some(mtime), Some(mode)) = (mtime, mode) else {
        return;
    };
    if let Err(e) = set_file_stat(dst, mtime, mode) {
        crate::displaylevel!(2, "rzlib: {}: cannot copy file attributes: {}\n", dst.display(), e);
    }
}

/// Decompresses the file at `src` into `dst`.
///
/// `dst` may be a path, [`STDOUT_MARK`] or [`NUL_MARK`]. It is ignored when
/// `prefs.test_mode` is set (nothing is written) or `prefs.output_dir` is set
/// (the library names the file). With `prefs.use_stored_name` a gzip stored
/// name replaces a regular `dst`, placed next to the source.
///
/// The source is removed only after the destination is fully written, and
/// only when `prefs.remove_src_file` is set.
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let data = read_src_file(src)?;
    let decoded = decode(src, &data, prefs)?;

    let written: Option<PathBuf> = if prefs.test_mode {
        None
    } else if let Some(dir) = &prefs.output_dir {
        let name = output_file_name(&decoded).map_err(|e| to_io_error(src, e))?;
        let path = write_to_dir(dir, &name, &decoded.data).map_err(|e| to_io_error(src, e))?;
        Some(path)
    } else {
        let stored = if prefs.use_stored_name && !is_special_dst(dst) {
            stored_name_dst(src, &decoded).map_err(|e| to_io_error(src, e))?
        } else {
            None
        };
        let dst_path = match &stored {
            Some(p) => p.to_string_lossy().into_owned(),
            None => dst.to_owned(),
        };
        if !is_stdin(src) && Path::new(&dst_path) == Path::new(src) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: source and destination are the same file", src),
            ));
        }
        let mut out = open_dst_file(&dst_path, prefs)?;
        out.write_all(&decoded.data)?;
        out.flush()?;
        (!is_special_dst(&dst_path)).then(|| PathBuf::from(dst_path))
    };

    if let Some(path) = &written {
        if is_reg_file(path) {
            copy_file_stat(src, path, &decoded, prefs);
        }
    }

    if prefs.remove_src_file && !prefs.test_mode && !is_stdin(src) {
        fs::remove_file(src).map_err(|e| io::Error::new(e.kind(), format!("{}: {}", src, e)))?;
    }

    crate::displaylevel!(
        2,
        "{:<30}: {} {} bytes \n",
        src,
        if prefs.test_mode { "OK," } else { "decoded" },
        decoded.len()
    );

    Ok(DecompressStats {
        format: decoded.format,
        compressed_bytes: data.len() as u64,
        decompressed_bytes: decoded.len() as u64,
        dst: written,
    })
}

// ---------------------------------------------------------------------------
// Multiple files
// ---------------------------------------------------------------------------

/// Decompresses several sources.
///
/// `dst_mark` of `Some(STDOUT_MARK)` or `Some(NUL_MARK)` sends every output
/// there; `None` derives each destination by stripping a known suffix
/// (sources without one are skipped) unless test mode or an output directory
/// makes the name irrelevant.
///
/// Files are processed concurrently on `prefs.nb_workers` threads, except
/// when writing to stdout, which stays sequential to keep outputs in order.
///
/// Returns `Ok(())` when every file succeeds; otherwise `Err` summarising
/// how many failed and how many were skipped.
pub fn decompress_multiple_filenames(
    srcs: &[&str],
    dst_mark: Option<&str>,
    prefs: &Prefs,
) -> io::Result<()> {
    let time_start = Instant::now();

    let mut jobs: Vec<(&str, String)> = Vec::with_capacity(srcs.len());
    let mut skipped_files = 0usize;
    for &src in srcs {
        let dst = match dst_mark {
            Some(mark) => mark.to_owned(),
            None if prefs.test_mode || prefs.output_dir.is_some() => NUL_MARK.to_owned(),
            None => match output_filename_for(src) {
                Some(name) => name,
                None => {
                    crate::displaylevel!(
                        1,
                        "rzlib: {}: unknown suffix -- ignored \n",
                        src
                    );
                    skipped_files += 1;
                    continue;
                }
            },
        };
        jobs.push((src, dst));
    }

    let run = |(src, dst): &(&str, String)| -> Option<u64> {
        match decompress_filename(src, dst, prefs) {
            Ok(stats) => Some(stats.decompressed_bytes),
            Err(e) => {
                crate::displaylevel!(1, "rzlib: {}\n", e);
                None
            }
        }
    };

    let sequential = prefs.nb_workers <= 1 || jobs.len() <= 1 || dst_mark == Some(STDOUT_MARK);
    let results: Vec<Option<u64>> = if sequential {
        jobs.iter().map(run).collect()
    } else {
        crate::displaylevel!(4, "Using {} threads for decompression \n", prefs.nb_workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(prefs.nb_workers)
            .build()
            .map_err(|e| io::Error::other(e.to_string()))?;
        pool.install(|| jobs.par_iter().map(run).collect())
    };

    let failed_files = results.iter().filter(|r| r.is_none()).count();
    let total: u64 = results.iter().flatten().sum();
    crate::displaylevel!(
        3,
        "{} files, {} bytes decoded in {:.2} s \n",
        results.len() - failed_files,
        total,
        time_start.elapsed().as_secs_f64()
    );

    if failed_files + skipped_files > 0 {
        Err(io::Error::other(format!(
            "{} file(s) could not be decompressed; {} file(s) skipped",
            failed_files, skipped_files
        )))
    } else {
        Ok(())
    }
}

/// Modification time stored in the gzip header; `None` when absent or zero.
pub fn stored_mtime(decoded: &Decompressed) -> Option<SystemTime> {
    decoded
        .header
        .as_ref()
        .filter(|h| h.mtime != 0)
        .map(|h| UNIX_EPOCH + Duration::from_secs(u64::from(h.mtime)))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
