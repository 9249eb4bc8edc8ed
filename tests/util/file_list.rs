// Integration tests for util/file_list.rs: directory expansion for `-r`

use std::fs;
use std::path::{Path, PathBuf};

use rzlib::io::has_compressed_suffix;
use rzlib::util::create_file_list;
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"x").unwrap();
}

#[test]
fn nested_tree_filtered_by_suffix_in_name_order() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    touch(&root.join("b.gz"));
    touch(&root.join("a.zz"));
    touch(&root.join("readme.txt"));
    touch(&root.join("sub/c.zlib"));
    touch(&root.join("sub/deeper/d.z"));
    touch(&root.join("sub/deeper/e.tar"));

    let list = create_file_list(&[root], has_compressed_suffix).unwrap();
    let rel: Vec<PathBuf> = list.iter().map(|p| p.strip_prefix(root).unwrap().to_path_buf()).collect();
    assert_eq!(
        rel,
        vec![
            PathBuf::from("a.zz"),
            PathBuf::from("b.gz"),
            PathBuf::from("sub/c.zlib"),
            PathBuf::from("sub/deeper/d.z"),
        ]
    );
}

#[test]
fn explicit_files_bypass_the_filter() {
    let dir = TempDir::new().unwrap();
    let named = dir.path().join("named.bin");
    touch(&named);
    let list = create_file_list(&[named.as_path()], |_| false).unwrap();
    assert_eq!(list, vec![named]);
}

#[test]
fn missing_input_is_forwarded_for_later_reporting() {
    let missing = Path::new("/nonexistent/__rzlib__/x.gz");
    let list = create_file_list(&[missing], has_compressed_suffix).unwrap();
    assert_eq!(list, vec![missing.to_path_buf()]);
}

#[cfg(unix)]
#[test]
fn symlinked_directories_are_not_followed() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("target");
    touch(&target.join("inside.gz"));
    let walk = dir.path().join("walk");
    fs::create_dir(&walk).unwrap();
    std::os::unix::fs::symlink(&target, walk.join("link")).unwrap();

    assert!(create_file_list(&[walk.as_path()], has_compressed_suffix).unwrap().is_empty());
}
