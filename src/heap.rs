//! `malloc`-backed byte buffer whose ownership can be handed to C.
//!
//! Buffers returned across the C boundary must be releasable with the C
//! allocator's `free()`, so they are allocated with `libc::malloc` rather
//! than the Rust global allocator. An empty buffer still owns a one-byte
//! allocation so that a successful call never returns NULL.

use std::ptr::{self, NonNull};
use std::slice;

use crate::error::ZlibError;

/// Owned, `malloc`-allocated byte region.
///
/// Freed on drop unless ownership is released with [`HeapBuffer::into_raw`].
#[derive(Debug)]
pub struct HeapBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

// SAFETY: HeapBuffer uniquely owns its allocation; no interior aliasing.
unsafe impl Send for HeapBuffer {}
unsafe impl Sync for HeapBuffer {}

impl HeapBuffer {
    /// Allocates a new region and copies `data` into it.
    pub fn from_slice(data: &[u8]) -> Result<Self, ZlibError> {
        let size = data.len().max(1);
        // SAFETY: malloc with a non-zero size; a null result is handled below.
        let raw = unsafe { libc::malloc(size) } as *mut u8;
        let ptr = NonNull::new(raw).ok_or(ZlibError::Allocation(size))?;
        // SAFETY: `ptr` is valid for `size >= data.len()` bytes and freshly
        // allocated, so it cannot overlap `data`.
        unsafe { ptr::copy_nonoverlapping(data.as_ptr(), ptr.as_ptr(), data.len()) };
        Ok(HeapBuffer { ptr, len: data.len() })
    }

    /// Re-owns a region previously released by [`HeapBuffer::into_raw`].
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    /// `ptr` must come from `into_raw` (or `malloc`) with at least `len`
    /// initialised bytes, and must not be owned by anything else.
    pub unsafe fn from_raw(ptr: *mut u8, len: usize) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| HeapBuffer { ptr, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` owns at least `len` initialised bytes.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Releases ownership; the caller must eventually `free()` the pointer.
    pub fn into_raw(self) -> (*mut u8, usize) {
        let me = std::mem::ManuallyDrop::new(self);
        (me.ptr.as_ptr(), me.len)
    }
}

impl Drop for HeapBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` was obtained from malloc and is still owned.
        unsafe { libc::free(self.ptr.as_ptr() as *mut libc::c_void) };
    }
}

impl AsRef<[u8]> for HeapBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
