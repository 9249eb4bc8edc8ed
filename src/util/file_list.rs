//! File list construction with recursive directory expansion.
//!
//! Given a mixed list of file and directory paths, [`create_file_list`]
//! returns a flat list of files to decode. Directories are walked with
//! [`walkdir`] and only entries accepted by the caller's filter are kept;
//! explicitly named files are always forwarded.
//!
//! Symlinks are never followed during traversal (`walkdir`'s default), so
//! cyclic links cannot loop and symlink entries are skipped.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand `inputs` into a flat list of files.
///
/// - Non-directory inputs are forwarded unchanged.
/// - Directories are walked recursively; regular files for which `keep`
///   returns `true` are included, in walk order.
/// - An unreadable directory entry aborts the walk with an `io::Error`.
pub fn create_file_list<F>(inputs: &[&Path], keep: F) -> io::Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut result = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            result.push(input.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                e.io_error()
                    .map(|io| io::Error::new(io.kind(), io.to_string()))
                    .unwrap_or_else(|| io::Error::other(e.to_string()))
            })?;
            if entry.file_type().is_file() && keep(entry.path()) {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("a.gz"), b"a").unwrap();
        fs::write(root.join("notes.txt"), b"n").unwrap();
        fs::write(root.join("sub/b.zz"), b"b").unwrap();
        dir
    }

    fn compressed(p: &Path) -> bool {
        matches!(p.extension().and_then(|e| e.to_str()), Some("gz" | "zz"))
    }

    #[test]
    fn expands_directory_recursively_with_filter() {
        let dir = make_tree();
        let list = create_file_list(&[dir.path()], compressed).unwrap();
        assert_eq!(list, vec![dir.path().join("a.gz"), dir.path().join("sub/b.zz")]);
    }

    #[test]
    fn named_file_bypasses_filter() {
        let dir = make_tree();
        let file = dir.path().join("notes.txt");
        let list = create_file_list(&[file.as_path()], compressed).unwrap();
        assert_eq!(list, vec![file]);
    }

    #[test]
    fn empty_inputs_returns_empty_list() {
        assert!(create_file_list(&[], |_| true).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_is_not_recursed_into() {
        use std::os::unix::fs::symlink;
        let dir = make_tree();
        let other = TempDir::new().unwrap();
        fs::write(other.path().join("c.gz"), b"c").unwrap();
        symlink(other.path(), dir.path().join("link_to_other")).unwrap();

        let list = create_file_list(&[dir.path()], compressed).unwrap();
        assert_eq!(list.len(), 2);
    }
}
