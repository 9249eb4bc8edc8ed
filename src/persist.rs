//! Writing decompressed output into a directory.
//!
//! Naming: a gzip member's stored file name (base name only) when present,
//! otherwise the stream's trailer checksum as eight hex digits plus
//! [`OUTPUT_EXTENSION`]. Writes land in a temporary file in the target
//! directory that is renamed onto the final name, so readers never observe a
//! partially written file and concurrent writers of the same name resolve to
//! one complete file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::OUTPUT_EXTENSION;
use crate::displaylevel;
use crate::error::ZlibError;
use crate::types::Decompressed;

const TEMP_PREFIX: &str = ".rzlib-";

/// Reduces a stored gzip name to a bare file name.
///
/// Directory components (either separator) are dropped so a stored name can
/// never escape the target directory.
pub fn sanitize_file_name(stored: &str) -> Result<String, ZlibError> {
    let base = stored.rsplit(['/', '\\']).next().unwrap_or("");
    match base {
        "" | "." | ".." => Err(ZlibError::InvalidFileName(stored.to_owned())),
        name => Ok(name.to_owned()),
    }
}

/// File name used when persisting `decoded`.
pub fn output_file_name(decoded: &Decompressed) -> Result<String, ZlibError> {
    match decoded.header.as_ref().and_then(|h| h.file_name.as_deref()) {
        Some(stored) => sanitize_file_name(stored),
        None => Ok(format!("{:08x}{}", decoded.checksum, OUTPUT_EXTENSION)),
    }
}

/// Writes `data` to `dir/file_name`, replacing any existing file.
///
/// `dir` must already exist. Returns the final path.
pub fn write_to_dir(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf, ZlibError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ZlibError::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ZlibError::NotADirectory(dir.to_path_buf()))
        }
        Err(e) => return Err(ZlibError::Io(e)),
    }
    if Path::new(file_name).file_name().and_then(|n| n.to_str()) != Some(file_name) {
        return Err(ZlibError::InvalidFileName(file_name.to_owned()));
    }

    let dest = dir.join(file_name);
    let mut tmp = tempfile::Builder::new().prefix(TEMP_PREFIX).tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    tmp.persist(&dest).map_err(|e| ZlibError::Io(e.error))?;

    displaylevel!(4, "persisted {} bytes to {}\n", data.len(), dest.display());
    Ok(dest)
}
