// Integration tests for src/io/decompress_dispatch.rs: file-level decompression
//
// Public API under test:
//   `rzlib::io::decompress_dispatch::decompress_filename`
//   `rzlib::io::decompress_dispatch::decompress_multiple_filenames`
//   `rzlib::io::decompress_dispatch::DecompressStats`

use rzlib::io::decompress_dispatch::{
    decompress_filename, decompress_multiple_filenames, output_filename_for, DecompressStats,
};
use rzlib::io::prefs::Prefs;
use rzlib::io::NUL_MARK;
use rzlib::Format;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::{Compression, GzBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_filename
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn single_zlib_file() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("data.zz");
    let dst = dir.path().join("data");
    fs::write(&src, zlib(b"file contents")).unwrap();

    let stats = decompress_filename(s(&src), s(&dst), &Prefs::default()).unwrap();
    assert_eq!(
        stats,
        DecompressStats {
            format: Format::Zlib,
            compressed_bytes: fs::metadata(&src).unwrap().len(),
            decompressed_bytes: 13,
            dst: Some(dst.clone()),
        }
    );
    assert_eq!(fs::read(&dst).unwrap(), b"file contents");
    assert!(src.exists(), "source kept by default");
}

#[test]
fn forced_format_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("data.gz");
    fs::write(&src, zlib(b"really zlib")).unwrap();
    let mut prefs = Prefs::default();
    prefs.format = Some(Format::Gzip);
    let err = decompress_filename(s(&src), s(&dir.path().join("data")), &prefs).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("data.gz"));
}

#[test]
fn corrupt_source_leaves_no_destination() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("bad.gz");
    let dst = dir.path().join("bad");
    let mut gz = gzip(&b"x".repeat(5000));
    let mid = gz.len() / 2;
    gz.truncate(mid);
    fs::write(&src, gz).unwrap();

    assert!(decompress_filename(s(&src), s(&dst), &Prefs::default()).is_err());
    assert!(!dst.exists());
}

#[test]
fn existing_destination_needs_overwrite() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("a.zz");
    let dst = dir.path().join("a");
    fs::write(&src, zlib(b"new")).unwrap();
    fs::write(&dst, b"old").unwrap();

    let err = decompress_filename(s(&src), s(&dst), &Prefs::default()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dst).unwrap(), b"old");

    let mut prefs = Prefs::default();
    prefs.set_overwrite(true);
    decompress_filename(s(&src), s(&dst), &prefs).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), b"new");
}

#[test]
fn remove_source_after_success_only() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.zz");
    let bad = dir.path().join("bad.zz");
    fs::write(&good, zlib(b"ok")).unwrap();
    fs::write(&bad, b"\x78\x9c garbage").unwrap();

    let mut prefs = Prefs::default();
    prefs.set_remove_src_file(true);
    decompress_filename(s(&good), s(&dir.path().join("good")), &prefs).unwrap();
    assert!(!good.exists());

    assert!(decompress_filename(s(&bad), s(&dir.path().join("bad")), &prefs).is_err());
    assert!(bad.exists());
}

#[test]
fn test_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("t.gz");
    fs::write(&src, gzip(b"verify only")).unwrap();
    let mut prefs = Prefs::default();
    prefs.set_test_mode(true);
    prefs.set_remove_src_file(true);

    let stats = decompress_filename(s(&src), NUL_MARK, &prefs).unwrap();
    assert_eq!(stats.decompressed_bytes, 11);
    assert_eq!(stats.dst, None);
    assert!(src.exists(), "test mode never removes the source");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn source_mtime_copied_to_destination() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("m.zz");
    let dst = dir.path().join("m");
    fs::write(&src, zlib(b"dated")).unwrap();
    let when = UNIX_EPOCH + Duration::from_secs(1_234_567_890);
    filetime::set_file_mtime(&src, filetime::FileTime::from_system_time(when)).unwrap();

    decompress_filename(s(&src), s(&dst), &Prefs::default()).unwrap();
    assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), when);
}

#[test]
fn stored_name_and_mtime_with_use_stored_name() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("download.gz");
    let mut enc = GzBuilder::new()
        .filename("original-name.txt")
        .mtime(1_000_000_000)
        .write(Vec::new(), Compression::default());
    enc.write_all(b"named payload").unwrap();
    fs::write(&src, enc.finish().unwrap()).unwrap();

    let mut prefs = Prefs::default();
    prefs.use_stored_name = true;
    let stats = decompress_filename(s(&src), s(&dir.path().join("download")), &prefs).unwrap();

    let expected = dir.path().join("original-name.txt");
    assert_eq!(stats.dst.as_deref(), Some(expected.as_path()));
    assert_eq!(fs::read(&expected).unwrap(), b"named payload");
    assert!(!dir.path().join("download").exists());
    assert_eq!(
        fs::metadata(&expected).unwrap().modified().unwrap(),
        UNIX_EPOCH + Duration::from_secs(1_000_000_000)
    );
}

#[test]
fn output_dir_uses_library_naming() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let src = dir.path().join("hello.zz");
    fs::write(&src, zlib(b"hello world")).unwrap();

    let mut prefs = Prefs::default();
    prefs.output_dir = Some(out.path().to_path_buf());
    let stats = decompress_filename(s(&src), NUL_MARK, &prefs).unwrap();
    let expected = out.path().join("1a0b045d.out");
    assert_eq!(stats.dst.as_deref(), Some(expected.as_path()));
    assert_eq!(fs::read(expected).unwrap(), b"hello world");
}

#[test]
fn output_dir_missing_is_error() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("hello.zz");
    fs::write(&src, zlib(b"hello world")).unwrap();
    let mut prefs = Prefs::default();
    prefs.output_dir = Some(dir.path().join("missing"));
    assert!(decompress_filename(s(&src), NUL_MARK, &prefs).is_err());
}

#[test]
fn max_output_limit_applies_per_file() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("big.zz");
    fs::write(&src, zlib(&vec![0u8; 100_000])).unwrap();
    let mut prefs = Prefs::default();
    prefs.set_max_output(Some(1000));
    let err = decompress_filename(s(&src), s(&dir.path().join("big")), &prefs).unwrap_err();
    assert!(err.to_string().contains("limit"), "{}", err);
}

// ─────────────────────────────────────────────────────────────────────────────
// decompress_multiple_filenames
// ─────────────────────────────────────────────────────────────────────────────

fn make_batch(dir: &Path, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let (name, bytes) = if i % 2 == 0 {
                (format!("f{}.gz", i), gzip(format!("payload {}", i).as_bytes()))
            } else {
                (format!("f{}.zz", i), zlib(format!("payload {}", i).as_bytes()))
            };
            let p = dir.join(name);
            fs::write(&p, bytes).unwrap();
            p.to_str().unwrap().to_owned()
        })
        .collect()
}

#[test]
fn multiple_files_sequential() {
    let dir = TempDir::new().unwrap();
    let srcs = make_batch(dir.path(), 4);
    let refs: Vec<&str> = srcs.iter().map(String::as_str).collect();
    decompress_multiple_filenames(&refs, None, &Prefs::default()).unwrap();
    for i in 0..4 {
        let out = dir.path().join(format!("f{}", i));
        assert_eq!(fs::read(out).unwrap(), format!("payload {}", i).as_bytes());
    }
}

#[test]
fn multiple_files_parallel() {
    let dir = TempDir::new().unwrap();
    let srcs = make_batch(dir.path(), 16);
    let refs: Vec<&str> = srcs.iter().map(String::as_str).collect();
    let mut prefs = Prefs::default();
    prefs.set_nb_workers(4);
    decompress_multiple_filenames(&refs, None, &prefs).unwrap();
    for i in 0..16 {
        assert!(dir.path().join(format!("f{}", i)).exists());
    }
}

#[test]
fn unknown_suffix_skipped_and_reported() {
    let dir = TempDir::new().unwrap();
    let mut srcs = make_batch(dir.path(), 2);
    let odd = dir.path().join("notes.txt");
    fs::write(&odd, zlib(b"not named like a compressed file")).unwrap();
    srcs.push(odd.to_str().unwrap().to_owned());
    let refs: Vec<&str> = srcs.iter().map(String::as_str).collect();

    let err = decompress_multiple_filenames(&refs, None, &Prefs::default()).unwrap_err();
    assert!(err.to_string().contains("1 file(s) skipped"), "{}", err);
    assert!(dir.path().join("f0").exists());
    assert!(dir.path().join("f1").exists());
}

#[test]
fn one_bad_file_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    let mut srcs = make_batch(dir.path(), 3);
    let bad = dir.path().join("broken.gz");
    fs::write(&bad, b"\x1f\x8b\x08\x00broken").unwrap();
    srcs.insert(1, bad.to_str().unwrap().to_owned());
    let refs: Vec<&str> = srcs.iter().map(String::as_str).collect();

    let err = decompress_multiple_filenames(&refs, None, &Prefs::default()).unwrap_err();
    assert!(err.to_string().contains("1 file(s) could not be decompressed"), "{}", err);
    for i in 0..3 {
        assert!(dir.path().join(format!("f{}", i)).exists());
    }
    assert!(!dir.path().join("broken").exists());
}

#[test]
fn multiple_files_to_discard() {
    let dir = TempDir::new().unwrap();
    let srcs = make_batch(dir.path(), 3);
    let refs: Vec<&str> = srcs.iter().map(String::as_str).collect();
    decompress_multiple_filenames(&refs, Some(NUL_MARK), &Prefs::default()).unwrap();
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 3);
}

#[test]
fn suffix_table() {
    assert_eq!(output_filename_for("archive.tgz").as_deref(), Some("archive.tar"));
    assert_eq!(output_filename_for("x.zlib").as_deref(), Some("x"));
    assert_eq!(output_filename_for("x.bin"), None);
}
