//! C-ABI entry points, declared in `include/rzlib.h`.
//!
//! Every function here is a leaf boundary: it never unwinds into C, reports
//! failure only through its return value, zeroes `*new_buf_len` on failure,
//! and records a thread-local error code and message that the caller can
//! fetch with [`rzlib_last_error`] / [`rzlib_last_error_message`].
//!
//! Returned buffers are allocated with `malloc`; release them with `free()`
//! or [`rzlib_free`].

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::ptr;
use std::slice;

use crate::config::C_ABI_MAX_OUTPUT;
use crate::error::{
    ZlibError, RZLIB_ALLOCATION_FAILURE, RZLIB_INVALID_INPUT, RZLIB_IO_FAILURE, RZLIB_OK,
};
use crate::heap::HeapBuffer;
use crate::persist::{output_file_name, write_to_dir};
use crate::types::Options;
use crate::{gzip, zlib};

// ─── thread-local error slot ─────────────────────────────────────────────────

thread_local! {
    static LAST_ERROR: RefCell<(c_int, CString)> = RefCell::new((RZLIB_OK, CString::default()));
}

fn set_last_error(err: &ZlibError) {
    let msg = CString::new(err.to_string().replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = (err.code(), msg));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = (RZLIB_OK, CString::default()));
}

// ─── argument conversion ─────────────────────────────────────────────────────

/// Borrows the caller's input region.
///
/// # Safety
/// When non-null, `buf` must be readable for `buf_len` bytes for the
/// duration of the call.
unsafe fn input_slice<'a>(buf: *const c_void, buf_len: c_int) -> Result<&'a [u8], ZlibError> {
    if buf_len < 0 {
        return Err(ZlibError::NegativeLength(i64::from(buf_len)));
    }
    if buf_len == 0 {
        return Ok(&[]);
    }
    if buf.is_null() {
        return Err(ZlibError::NullInput);
    }
    Ok(slice::from_raw_parts(buf as *const u8, buf_len as usize))
}

/// Converts the optional directory argument.
///
/// # Safety
/// When non-null, `path` must point to a NUL-terminated string.
unsafe fn dir_path(path: *const c_char) -> Option<PathBuf> {
    if path.is_null() {
        return None;
    }
    let bytes = CStr::from_ptr(path).to_bytes();
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Some(PathBuf::from(std::ffi::OsStr::from_bytes(bytes)))
    }
    #[cfg(not(unix))]
    {
        Some(PathBuf::from(String::from_utf8_lossy(bytes).into_owned()))
    }
}

/// Runs `body`, converting its outcome to the C convention.
///
/// Panics are caught and reported as invalid input; the out-length is zeroed
/// before `body` runs so it is never left stale.
fn boundary<F>(new_buf_len: *mut c_int, body: F) -> *mut c_void
where
    F: FnOnce() -> Result<HeapBuffer, ZlibError>,
{
    if new_buf_len.is_null() {
        set_last_error(&ZlibError::NullOutputLength);
        return ptr::null_mut();
    }
    // SAFETY: checked non-null above; the caller guarantees it is writable.
    unsafe { *new_buf_len = 0 };

    let outcome = panic::catch_unwind(AssertUnwindSafe(body))
        .unwrap_or_else(|_| Err(ZlibError::Corrupt("decoder panicked".into())));

    match outcome {
        Ok(buf) => {
            let (data, len) = buf.into_raw();
            // SAFETY: as above. `len` fits: outputs are capped at C_ABI_MAX_OUTPUT.
            unsafe { *new_buf_len = len as c_int };
            clear_last_error();
            data as *mut c_void
        }
        Err(err) => {
            set_last_error(&err);
            ptr::null_mut()
        }
    }
}

fn c_abi_options() -> Options {
    Options::default().with_max_output(C_ABI_MAX_OUTPUT)
}

// ─────────────────────────────────────────────────────────────────────────────
// void *decompress_zlib_to_heap(const void *buf, int buf_len,
//                               const char *dir_full_path, int *new_buf_len);
// ─────────────────────────────────────────────────────────────────────────────

/// Decompresses a zlib stream into a new `malloc`ed buffer.
///
/// When `dir_full_path` is non-null the output is also written to a file in
/// that directory (see [`crate::persist`] for naming); a failed write fails
/// the whole call and the buffer is released.
///
/// # Safety
/// `buf` must be readable for `buf_len` bytes (may be null when `buf_len`
/// is 0), `dir_full_path` must be null or NUL-terminated, and `new_buf_len`
/// must be writable.
#[no_mangle]
pub unsafe extern "C" fn decompress_zlib_to_heap(
    buf: *const c_void,
    buf_len: c_int,
    dir_full_path: *const c_char,
    new_buf_len: *mut c_int,
) -> *mut c_void {
    boundary(new_buf_len, || {
        let input = input_slice(buf, buf_len)?;
        let decoded = zlib::decompress_with(input, &c_abi_options())?;
        let target = match dir_path(dir_full_path) {
            Some(dir) => Some((dir, output_file_name(&decoded)?)),
            None => None,
        };
        // Only the malloc copy stays alive while the file is written.
        let heap = HeapBuffer::from_slice(&decoded.data)?;
        drop(decoded);
        if let Some((dir, name)) = target {
            write_to_dir(&dir, &name, heap.as_slice())?;
        }
        Ok(heap)
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// void *decompress_gzip_to_heap(const void *buf, int buf_len, int *new_buf_len);
// ─────────────────────────────────────────────────────────────────────────────

/// Decompresses every member of a gzip file into a new `malloc`ed buffer.
///
/// # Safety
/// Same contract as [`decompress_zlib_to_heap`].
#[no_mangle]
pub unsafe extern "C" fn decompress_gzip_to_heap(
    buf: *const c_void,
    buf_len: c_int,
    new_buf_len: *mut c_int,
) -> *mut c_void {
    boundary(new_buf_len, || {
        let input = input_slice(buf, buf_len)?;
        let decoded = gzip::decompress_with(input, &c_abi_options())?;
        HeapBuffer::from_slice(&decoded.data)
    })
}

// ─── error reporting ─────────────────────────────────────────────────────────

/// Error code of the last call on this thread (0 after a success).
#[no_mangle]
pub extern "C" fn rzlib_last_error() -> c_int {
    LAST_ERROR.with(|slot| slot.borrow().0)
}

/// Message for the last error on this thread; empty after a success.
///
/// The pointer stays valid until the next rzlib call on the same thread.
#[no_mangle]
pub extern "C" fn rzlib_last_error_message() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().1.as_ptr())
}

/// Static description of an error code. Never free the result.
#[no_mangle]
pub extern "C" fn rzlib_error_string(code: c_int) -> *const c_char {
    let msg: &'static [u8] = match code {
        RZLIB_OK => b"success\0",
        RZLIB_INVALID_INPUT => b"invalid input\0",
        RZLIB_ALLOCATION_FAILURE => b"allocation failure\0",
        RZLIB_IO_FAILURE => b"I/O failure\0",
        _ => b"unknown error\0",
    };
    msg.as_ptr() as *const c_char
}

// ─── memory & version ────────────────────────────────────────────────────────

/// Releases a buffer returned by this library. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or a buffer returned by a `*_to_heap` function that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn rzlib_free(ptr: *mut c_void) {
    if !ptr.is_null() {
        libc::free(ptr);
    }
}

/// Library version as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn rzlib_version_string() -> *const c_char {
    crate::RZLIB_VERSION_CSTR.as_ptr() as *const c_char
}
