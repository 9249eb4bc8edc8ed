#![no_main]
use std::os::raw::{c_int, c_void};
use std::ptr;

use libfuzzer_sys::fuzz_target;
use rzlib::abi::{decompress_gzip_to_heap, decompress_zlib_to_heap, rzlib_free};

fuzz_target!(|data: &[u8]| {
    let Ok(n) = c_int::try_from(data.len()) else {
        return;
    };
    for gzip in [false, true] {
        let mut len: c_int = -1;
        let out = unsafe {
            if gzip {
                decompress_gzip_to_heap(data.as_ptr() as *const c_void, n, &mut len)
            } else {
                decompress_zlib_to_heap(data.as_ptr() as *const c_void, n, ptr::null(), &mut len)
            }
        };
        assert!(len >= 0);
        if out.is_null() {
            assert_eq!(len, 0);
        }
        unsafe { rzlib_free(out) };
    }
});
