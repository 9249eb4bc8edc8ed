// Integration tests for src/io/file_info.rs: `--list` summaries
//
// Public API under test:
//   `rzlib::io::file_info::get_compressed_file_info`
//   `rzlib::io::file_info::CompressedFileInfo`

use rzlib::io::file_info::get_compressed_file_info;
use rzlib::io::prefs::Prefs;
use rzlib::Format;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn zlib_summary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("text.zz");
    let payload = b"summarise me ".repeat(400);
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::best());
    enc.write_all(&payload).unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();

    let info = get_compressed_file_info(path.to_str().unwrap(), &Prefs::default()).unwrap();
    assert_eq!(info.file_name, "text.zz");
    assert_eq!(info.format, Format::Zlib);
    assert_eq!(info.decompressed_size, payload.len() as u64);
    assert_eq!(info.compressed_size, fs::metadata(&path).unwrap().len());
    assert!(info.header.is_none());
    let ratio = info.ratio().unwrap();
    assert!(ratio > 0.0 && ratio < 10.0, "ratio {}", ratio);
}

#[test]
fn multi_member_gzip_summed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("two.gz");
    let mut bytes = Vec::new();
    for part in [&b"one "[..], &b"two"[..]] {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(part).unwrap();
        bytes.extend(enc.finish().unwrap());
    }
    fs::write(&path, bytes).unwrap();

    let info = get_compressed_file_info(path.to_str().unwrap(), &Prefs::default()).unwrap();
    assert_eq!(info.format, Format::Gzip);
    assert_eq!(info.decompressed_size, 7);
}

#[test]
fn unrecognised_file_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.txt");
    fs::write(&path, b"just text").unwrap();
    let err = get_compressed_file_info(path.to_str().unwrap(), &Prefs::default()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn missing_file_is_not_found() {
    let err = get_compressed_file_info("/nonexistent/__rzlib__.gz", &Prefs::default()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
