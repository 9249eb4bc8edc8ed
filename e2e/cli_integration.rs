// e2e/cli_integration.rs: black-box tests of the `rzlib` binary
//
// Runs the binary with std::process::Command. Covers file naming, stdin and
// stdout plumbing, test and list modes, overwrite handling, multi-file runs
// and exit codes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::{Compression, GzBuilder};
use tempfile::TempDir;

/// Locate the `rzlib` binary produced by Cargo.
fn rzlib_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_rzlib") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("rzlib");
    p
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(rzlib_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RZLIB_MAX_OUTPUT")
        .env_remove("RZLIB_NBWORKERS")
        .output()
        .expect("failed to run rzlib")
}

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

fn payload() -> Vec<u8> {
    b"Hello, rzlib!\n".repeat(300)
}

// ── 1. Suffix-derived output names ───────────────────────────────────────────

#[test]
fn decompress_zz_strips_suffix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt.zz"), zlib(&payload())).unwrap();

    let out = run(dir.path(), &["notes.txt.zz"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), payload());
    assert!(dir.path().join("notes.txt.zz").exists(), "source kept by default");
}

#[test]
fn decompress_gz_with_explicit_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.gz"), gzip(&payload())).unwrap();

    let out = run(dir.path(), &["-d", "in.gz", "restored.bin"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("restored.bin")).unwrap(), payload());
}

#[test]
fn unknown_suffix_without_output_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("data.bin"), zlib(b"x")).unwrap();

    let out = run(dir.path(), &["data.bin"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot determine an output filename"));
}

// ── 2. stdin / stdout ────────────────────────────────────────────────────────

#[test]
fn stdout_flag_writes_to_stdout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.zz"), zlib(&payload())).unwrap();

    let out = run(dir.path(), &["-c", "in.zz"]);
    assert!(out.status.success());
    assert_eq!(out.stdout, payload());
    assert!(!dir.path().join("in").exists());
}

#[test]
fn stdin_to_stdout_pipe() {
    let mut child = Command::new(rzlib_bin())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn rzlib");
    child.stdin.take().unwrap().write_all(&gzip(&payload())).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(out.stdout, payload());
}

// ── 3. Test and list modes ───────────────────────────────────────────────────

#[test]
fn test_mode_accepts_good_and_rejects_corrupt() {
    let dir = TempDir::new().unwrap();
    let good = zlib(&payload());
    let mut bad = good.clone();
    let n = bad.len();
    bad[n - 1] ^= 0x55;
    fs::write(dir.path().join("good.zz"), good).unwrap();
    fs::write(dir.path().join("bad.zz"), bad).unwrap();

    assert!(run(dir.path(), &["-t", "good.zz"]).status.success());
    assert_eq!(run(dir.path(), &["-t", "bad.zz"]).status.code(), Some(1));
    assert!(!dir.path().join("good").exists());
    assert!(!dir.path().join("bad").exists());
}

#[test]
fn list_mode_prints_table() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.zz"), zlib(&payload())).unwrap();
    fs::write(dir.path().join("b.gz"), gzip(&payload())).unwrap();

    let out = run(dir.path(), &["-l", "a.zz", "b.gz"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Uncompressed"));
    assert!(stdout.contains("zlib") && stdout.contains("a.zz"));
    assert!(stdout.contains("gzip") && stdout.contains("b.gz"));
}

#[test]
fn list_mode_reports_bad_file_but_lists_the_rest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("junk.gz"), b"not compressed").unwrap();
    fs::write(dir.path().join("ok.gz"), gzip(b"ok")).unwrap();

    let out = run(dir.path(), &["-l", "junk.gz", "ok.gz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("ok.gz"));
}

// ── 4. Overwrite, removal, naming ────────────────────────────────────────────

#[test]
fn existing_output_refused_without_force() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.zz"), zlib(&payload())).unwrap();
    fs::write(dir.path().join("in"), b"precious").unwrap();

    let out = run(dir.path(), &["in.zz"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("in")).unwrap(), b"precious");

    let out = run(dir.path(), &["-f", "in.zz"]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("in")).unwrap(), payload());
}

#[test]
fn rm_removes_source_on_success() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gone.gz"), gzip(b"bye")).unwrap();

    assert!(run(dir.path(), &["--rm", "gone.gz"]).status.success());
    assert!(!dir.path().join("gone.gz").exists());
    assert_eq!(fs::read(dir.path().join("gone")).unwrap(), b"bye");
}

#[test]
fn output_dir_uses_checksum_name() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).unwrap();
    fs::write(dir.path().join("hello.zz"), zlib(b"hello world")).unwrap();

    let out = run(dir.path(), &["-D", "out", "hello.zz"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(out_dir.join("1a0b045d.out")).unwrap(), b"hello world");
}

#[test]
fn stored_name_used_with_name_flag() {
    let dir = TempDir::new().unwrap();
    let mut enc = GzBuilder::new()
        .filename("original.csv")
        .write(Vec::new(), Compression::default());
    enc.write_all(b"a,b\n").unwrap();
    fs::write(dir.path().join("renamed.gz"), enc.finish().unwrap()).unwrap();

    assert!(run(dir.path(), &["-N", "renamed.gz"]).status.success());
    assert_eq!(fs::read(dir.path().join("original.csv")).unwrap(), b"a,b\n");
    assert!(!dir.path().join("renamed").exists());
}

// ── 5. Multiple inputs ───────────────────────────────────────────────────────

#[test]
fn multiple_inputs_in_parallel() {
    let dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..6).map(|i| format!("part{}.gz", i)).collect();
    for (i, name) in names.iter().enumerate() {
        fs::write(dir.path().join(name), gzip(format!("part {}", i).as_bytes())).unwrap();
    }
    let mut args = vec!["-m", "-T", "3"];
    args.extend(names.iter().map(String::as_str));

    let out = run(dir.path(), &args);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    for i in 0..6 {
        let got = fs::read(dir.path().join(format!("part{}", i))).unwrap();
        assert_eq!(got, format!("part {}", i).as_bytes());
    }
}

#[test]
fn third_positional_without_multiple_is_bad_usage() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["a.gz", "b", "c.gz"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage"));
}

// ── 6. Limits and environment ────────────────────────────────────────────────

#[test]
fn max_output_from_env_and_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("big.zz"), zlib(&vec![0u8; 100_000])).unwrap();

    let out = Command::new(rzlib_bin())
        .args(["-t", "big.zz"])
        .current_dir(dir.path())
        .env("RZLIB_MAX_OUTPUT", "10K")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));

    // The flag takes precedence over the environment.
    let out = Command::new(rzlib_bin())
        .args(["-t", "--max-output", "1M", "big.zz"])
        .current_dir(dir.path())
        .env("RZLIB_MAX_OUTPUT", "10K")
        .output()
        .unwrap();
    assert!(out.status.success());
}

// ── 7. Informational flags ───────────────────────────────────────────────────

#[test]
fn version_exits_zero() {
    let out = Command::new(rzlib_bin()).arg("--version").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_exits_zero() {
    let out = Command::new(rzlib_bin()).arg("--help").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).to_lowercase().contains("usage"));
}

#[test]
fn unknown_flag_exits_one() {
    let out = Command::new(rzlib_bin()).arg("--frobnicate").output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad usage"));
}
