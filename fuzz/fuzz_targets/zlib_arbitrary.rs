#![no_main]
use libfuzzer_sys::fuzz_target;
use rzlib::Options;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics and runaway allocation are not.
    let opts = Options::default().with_max_output(64 << 20);
    if let Ok(decoded) = rzlib::decompress_zlib_with(data, &opts) {
        assert!(decoded.consumed <= data.len());
        assert_eq!(decoded.checksum, rzlib::checksum::adler32(&decoded.data));
    }
    let _ = rzlib::decompress_auto(data, &opts.with_trailing_data(true));
});
