#![no_main]
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let level = data.first().map_or(6, |b| u32::from(b % 10));
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::new(level));
    enc.write_all(data).unwrap();
    let z = enc.finish().unwrap();
    assert_eq!(rzlib::decompress_zlib(&z).unwrap(), data);
});
