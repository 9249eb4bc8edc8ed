// e2e/c_abi.rs: the exported C functions driven the way a C caller would
//
// Buffers are released with `libc::free` to check they really come from the
// C allocator.

use std::ffi::{CStr, CString};
use std::fs;
use std::io::Write;
use std::os::raw::{c_int, c_void};
use std::ptr;
use std::slice;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use rzlib::abi::{
    decompress_gzip_to_heap, decompress_zlib_to_heap, rzlib_free, rzlib_last_error,
    rzlib_last_error_message, rzlib_version_string,
};
use rzlib::error::{RZLIB_INVALID_INPUT, RZLIB_IO_FAILURE, RZLIB_OK};
use tempfile::TempDir;

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

/// Calls `decompress_zlib_to_heap`, copies the result out and frees it.
fn zlib_call(input: &[u8], dir: Option<&CString>) -> (Option<Vec<u8>>, c_int) {
    let mut len: c_int = -1;
    let dir_ptr = dir.map_or(ptr::null(), |d| d.as_ptr());
    let out = unsafe {
        decompress_zlib_to_heap(input.as_ptr() as *const c_void, input.len() as c_int, dir_ptr, &mut len)
    };
    if out.is_null() {
        return (None, len);
    }
    let bytes = unsafe { slice::from_raw_parts(out as *const u8, len as usize) }.to_vec();
    unsafe { libc::free(out) };
    (Some(bytes), len)
}

fn dir_cstring(dir: &std::path::Path) -> CString {
    CString::new(dir.to_str().unwrap()).unwrap()
}

#[test]
fn hello_world_to_heap() {
    let (out, len) = zlib_call(&zlib(b"hello world"), None);
    assert_eq!(out.as_deref(), Some(&b"hello world"[..]));
    assert_eq!(len, 11);
    assert_eq!(rzlib_last_error(), RZLIB_OK);
}

#[test]
fn hello_world_persisted_by_checksum() {
    let dir = TempDir::new().unwrap();
    let c_dir = dir_cstring(dir.path());
    let (out, len) = zlib_call(&zlib(b"hello world"), Some(&c_dir));
    assert_eq!(len, 11);
    assert_eq!(out.as_deref(), Some(&b"hello world"[..]));
    assert_eq!(fs::read(dir.path().join("1a0b045d.out")).unwrap(), b"hello world");
}

#[test]
fn missing_directory_fails_whole_call() {
    let dir = TempDir::new().unwrap();
    let c_dir = dir_cstring(&dir.path().join("absent"));
    let (out, len) = zlib_call(&zlib(b"hello world"), Some(&c_dir));
    assert!(out.is_none());
    assert_eq!(len, 0);
    assert_eq!(rzlib_last_error(), RZLIB_IO_FAILURE);
    let msg = unsafe { CStr::from_ptr(rzlib_last_error_message()) };
    assert!(!msg.to_bytes().is_empty());
}

#[test]
fn repeated_calls_are_independent() {
    let z = zlib(&b"abc".repeat(5_000));
    let (a, _) = zlib_call(&z, None);
    let (b, _) = zlib_call(&z, None);
    assert_eq!(a, b);
    assert_eq!(a.unwrap().len(), 15_000);
}

#[test]
fn corrupt_input_then_success_clears_error() {
    let (out, len) = zlib_call(b"definitely not zlib", None);
    assert!(out.is_none());
    assert_eq!(len, 0);
    assert_eq!(rzlib_last_error(), RZLIB_INVALID_INPUT);

    let (out, _) = zlib_call(&zlib(b"ok"), None);
    assert!(out.is_some());
    assert_eq!(rzlib_last_error(), RZLIB_OK);
}

#[test]
fn empty_output_is_non_null() {
    let z = zlib(b"");
    let mut len: c_int = -1;
    let out = unsafe {
        decompress_zlib_to_heap(z.as_ptr() as *const c_void, z.len() as c_int, ptr::null(), &mut len)
    };
    assert!(!out.is_null());
    assert_eq!(len, 0);
    unsafe { rzlib_free(out) };
}

#[test]
fn gzip_entry_point() {
    let mut gz = gzip(b"member one, ");
    gz.extend(gzip(b"member two"));
    let mut len: c_int = 0;
    let out = unsafe {
        decompress_gzip_to_heap(gz.as_ptr() as *const c_void, gz.len() as c_int, &mut len)
    };
    assert!(!out.is_null());
    let bytes = unsafe { slice::from_raw_parts(out as *const u8, len as usize) };
    assert_eq!(bytes, b"member one, member two");
    unsafe { libc::free(out) };
}

#[test]
fn gzip_entry_point_rejects_zlib() {
    let z = zlib(b"wrong container");
    let mut len: c_int = 5;
    let out = unsafe {
        decompress_gzip_to_heap(z.as_ptr() as *const c_void, z.len() as c_int, &mut len)
    };
    assert!(out.is_null());
    assert_eq!(len, 0);
    assert_eq!(rzlib_last_error(), RZLIB_INVALID_INPUT);
}

#[test]
fn errors_are_per_thread() {
    let _ = zlib_call(b"garbage!", None);
    assert_eq!(rzlib_last_error(), RZLIB_INVALID_INPUT);
    let other = std::thread::spawn(|| rzlib_last_error()).join().unwrap();
    assert_eq!(other, RZLIB_OK);
}

#[test]
fn version_string_is_nul_terminated() {
    let v = unsafe { CStr::from_ptr(rzlib_version_string()) };
    assert_eq!(v.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
}
