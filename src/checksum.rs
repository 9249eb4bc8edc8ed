//! Stream checksums: Adler-32 (zlib trailer) and CRC-32 (gzip trailer and
//! header CRC).
//!
//! Adler-32 comes from `adler2`, CRC-32 from `flate2::Crc`. The zlib trailer
//! itself is verified inside `flate2`; [`adler32`] supplies the actual value
//! reported with a checksum mismatch.

use flate2::Crc;

/// Adler-32 of `data` (RFC 1950 §8).
pub fn adler32(data: &[u8]) -> u32 {
    adler2::adler32_slice(data)
}

/// CRC-32 (IEEE 802.3 polynomial, as used by gzip) of `data`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = Crc::new();
    crc.update(data);
    crc.sum()
}
