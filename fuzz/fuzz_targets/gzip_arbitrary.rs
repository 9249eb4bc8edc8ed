#![no_main]
use libfuzzer_sys::fuzz_target;
use rzlib::Options;

fuzz_target!(|data: &[u8]| {
    let opts = Options::default().with_max_output(64 << 20);
    if let Ok(decoded) = rzlib::decompress_gzip_with(data, &opts) {
        assert!(decoded.consumed <= data.len());
        if let Some(header) = &decoded.header {
            // A stored name must never survive sanitising with a separator.
            if let Some(name) = &header.file_name {
                if let Ok(clean) = rzlib::persist::sanitize_file_name(name) {
                    assert!(!clean.contains('/') && !clean.contains('\\'));
                }
            }
        }
    }
});
