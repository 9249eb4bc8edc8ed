// Integration tests for util/file_status.rs: metadata helpers

use std::fs;
use std::time::{Duration, SystemTime};

use rzlib::util::{file_mode, is_directory, is_reg_file, set_file_stat};
use tempfile::TempDir;

#[test]
fn kind_predicates() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("f");
    fs::write(&file, b"1").unwrap();
    assert!(is_reg_file(&file));
    assert!(!is_directory(&file));
    assert!(is_directory(dir.path()));
    assert!(!is_reg_file(dir.path()));
    assert!(!is_reg_file(&dir.path().join("missing")));
}

#[test]
fn mtime_applied() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("dated");
    fs::write(&file, b"1").unwrap();
    let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_234_567_890);
    let mode = file_mode(&fs::metadata(&file).unwrap());

    set_file_stat(&file, when, mode).unwrap();
    assert_eq!(fs::metadata(&file).unwrap().modified().unwrap(), when);
}

#[cfg(unix)]
#[test]
fn permission_bits_applied() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("private");
    fs::write(&file, b"1").unwrap();

    set_file_stat(&file, SystemTime::now(), 0o600).unwrap();
    assert_eq!(file_mode(&fs::metadata(&file).unwrap()) & 0o777, 0o600);
}

#[test]
fn missing_file_is_error() {
    let dir = TempDir::new().unwrap();
    assert!(set_file_stat(&dir.path().join("nope"), SystemTime::now(), 0o644).is_err());
}
