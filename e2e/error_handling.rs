//! Error handling and edge cases across the public API.
//!
//! Hostile or damaged inputs must come back as a [`ZlibError`] with the
//! right [`ErrorKind`], never as a panic, and must never produce output.

use std::io::Write;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use rzlib::{
    decompress_auto, decompress_gzip, decompress_gzip_with, decompress_zlib, decompress_zlib_with,
    ErrorKind, Options, ZlibError,
};

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

// ═════════════════════════════════════════════════════════════════════════════
// Empty and tiny inputs
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn empty_input_is_invalid() {
    assert_eq!(decompress_zlib(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
    assert_eq!(decompress_gzip(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
    assert!(decompress_auto(&[], &Options::default()).is_err());
}

#[test]
fn header_only_is_truncated() {
    let z = zlib(b"body");
    assert!(matches!(decompress_zlib(&z[..2]), Err(ZlibError::Truncated)));
    let g = gzip(b"body");
    assert!(decompress_gzip(&g[..10]).is_err());
}

// ═════════════════════════════════════════════════════════════════════════════
// Header damage
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn zlib_wrong_method_rejected() {
    // CM = 15 with a valid FCHECK.
    let cmf = 0x7fu8;
    let flg = (31 - ((u16::from(cmf) << 8) % 31)) as u8;
    let err = decompress_zlib(&[cmf, flg, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
    assert!(matches!(err, ZlibError::BadHeader(_)), "{:?}", err);
}

#[test]
fn zlib_preset_dictionary_rejected() {
    let mut z = zlib(b"dict");
    // Set FDICT and repair FCHECK.
    let cmf = z[0];
    let mut flg = (z[1] | 0x20) & 0xe0;
    flg += (31 - (((u16::from(cmf) << 8) | u16::from(flg)) % 31) as u8) % 31;
    z[1] = flg;
    assert!(matches!(decompress_zlib(&z), Err(ZlibError::BadHeader(_))));
}

#[test]
fn gzip_bad_magic_and_method() {
    let mut g = gzip(b"x");
    g[0] = 0x1e;
    assert!(matches!(decompress_gzip(&g), Err(ZlibError::BadHeader(_))));

    let mut g = gzip(b"x");
    g[2] = 7;
    assert!(matches!(decompress_gzip(&g), Err(ZlibError::BadHeader(_))));
}

#[test]
fn gzip_reserved_flags_rejected() {
    let mut g = gzip(b"x");
    g[3] |= 0xe0;
    assert!(matches!(decompress_gzip(&g), Err(ZlibError::BadHeader(_))));
}

// ═════════════════════════════════════════════════════════════════════════════
// Body damage
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn reserved_block_type_is_corrupt() {
    // Valid zlib header, then BFINAL=1 BTYPE=11.
    let err = decompress_zlib(&[0x78, 0x9c, 0x07, 0, 0, 0, 0, 0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn flipped_body_bits_never_panic() {
    let z = zlib(&b"some moderately long text to damage ".repeat(50));
    for i in 2..z.len() {
        for bit in [0x01u8, 0x10, 0x80] {
            let mut damaged = z.clone();
            damaged[i] ^= bit;
            // Either detected, or (rarely) a different valid stream whose
            // checksum happens to match; never a panic.
            if let Err(e) = decompress_zlib(&damaged) {
                assert_eq!(e.kind(), ErrorKind::InvalidInput);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Limits and trailing data
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn limit_applies_across_gzip_members() {
    let mut g = gzip(&[b'a'; 600]);
    g.extend(gzip(&[b'b'; 600]));
    let opts = Options::default().with_max_output(1_000);
    assert!(matches!(
        decompress_gzip_with(&g, &opts),
        Err(ZlibError::OutputLimitExceeded(1_000))
    ));
}

#[test]
fn zero_limit_allows_only_empty_output() {
    let opts = Options::default().with_max_output(0);
    assert!(decompress_zlib_with(&zlib(b""), &opts).unwrap().data.is_empty());
    assert!(decompress_zlib_with(&zlib(b"x"), &opts).is_err());
}

#[test]
fn gzip_garbage_after_member_is_trailing_data() {
    let mut g = gzip(b"member");
    g.extend_from_slice(b"\x00\x00junk");
    let err = decompress_gzip(&g).unwrap_err();
    assert!(matches!(err, ZlibError::TrailingData(_)), "{:?}", err);

    let opts = Options::default().with_trailing_data(true);
    assert_eq!(decompress_gzip_with(&g, &opts).unwrap().data, b"member");
}

#[test]
fn error_messages_are_descriptive() {
    let err = decompress_zlib(b"nope nope").unwrap_err();
    let msg = err.to_string();
    assert!(!msg.is_empty());
    let io: std::io::Error = err.into();
    assert_eq!(io.kind(), std::io::ErrorKind::InvalidData);
}
