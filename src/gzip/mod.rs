//! gzip container (RFC 1952).
//!
//! A gzip file is one or more members, each a header ([`header`]), a raw
//! DEFLATE body and an 8-byte trailer holding the CRC-32 and the
//! uncompressed size modulo 2^32, both little-endian. Members are decoded in
//! order into a single output buffer.

pub mod header;

use crate::checksum::crc32;
use crate::config::GZIP_MIN_LEN;
use crate::displaylevel;
use crate::error::ZlibError;
use crate::inflate::{output_buffer, Inflater};
use crate::types::{Decompressed, Format, Options};

use header::{parse_header, GZIP_MAGIC};

pub const GZIP_TRAILER_LEN: usize = 8;

/// Decodes every member in `input`.
pub fn decompress_with(input: &[u8], opts: &Options) -> Result<Decompressed, ZlibError> {
    let mut out = output_buffer(input.len(), opts)?;
    let mut pos = 0usize;
    let mut first_header = None;
    let mut checksum: u32;
    let mut members = 0usize;

    loop {
        let member = &input[pos..];
        let header = parse_header(member)?;
        if member.len() < GZIP_MIN_LEN {
            return Err(ZlibError::Truncated);
        }

        let member_start = out.len();
        let body = &member[header.header_len..];
        let body_len = Inflater::raw().inflate_into(body, &mut out, opts.limit())?;

        let trailer_start = header.header_len + body_len;
        let trailer = member
            .get(trailer_start..trailer_start + GZIP_TRAILER_LEN)
            .ok_or(ZlibError::Truncated)?;
        let expected_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let expected_size = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

        let produced = &out[member_start..];
        let actual_crc = crc32(produced);
        if expected_crc != actual_crc {
            return Err(ZlibError::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }
        let actual_size = (produced.len() as u64 & 0xffff_ffff) as u32;
        if expected_size != actual_size {
            return Err(ZlibError::LengthMismatch {
                expected: expected_size,
                actual: actual_size,
            });
        }

        members += 1;
        checksum = expected_crc;
        displaylevel!(
            5,
            "gzip: member {} ({} bytes, crc 0x{:08x})\n",
            members,
            produced.len(),
            expected_crc
        );
        if first_header.is_none() {
            first_header = Some(header);
        }

        pos += trailer_start + GZIP_TRAILER_LEN;
        if pos == input.len() {
            break;
        }
        if input[pos..].starts_with(&GZIP_MAGIC) {
            continue;
        }
        let trailing = input.len() - pos;
        if !opts.allow_trailing_data {
            return Err(ZlibError::TrailingData(trailing));
        }
        displaylevel!(4, "gzip: ignoring {} trailing bytes\n", trailing);
        pos = input.len();
        break;
    }

    Ok(Decompressed {
        data: out,
        format: Format::Gzip,
        checksum,
        header: first_header,
        consumed: pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::{Compression, GzBuilder};
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn decodes_single_member() {
        let gz = gzip(b"hello world");
        let d = decompress_with(&gz, &Options::default()).unwrap();
        assert_eq!(d.data, b"hello world");
        assert_eq!(d.format, Format::Gzip);
        assert_eq!(d.checksum, crc32(b"hello world"));
        assert_eq!(d.consumed, gz.len());
    }

    #[test]
    fn stored_name_and_mtime_are_reported() {
        let mut enc = GzBuilder::new()
            .filename("notes.txt")
            .comment("weekly")
            .mtime(1_600_000_000)
            .write(Vec::new(), Compression::best());
        enc.write_all(b"some notes").unwrap();
        let gz = enc.finish().unwrap();

        let d = decompress_with(&gz, &Options::default()).unwrap();
        let h = d.header.unwrap();
        assert_eq!(h.file_name.as_deref(), Some("notes.txt"));
        assert_eq!(h.comment.as_deref(), Some("weekly"));
        assert_eq!(h.mtime, 1_600_000_000);
        assert_eq!(d.data, b"some notes");
    }

    #[test]
    fn concatenated_members_are_joined() {
        let mut gz = gzip(b"first,");
        gz.extend(gzip(b"second"));
        let d = decompress_with(&gz, &Options::default()).unwrap();
        assert_eq!(d.data, b"first,second");
        assert_eq!(d.checksum, crc32(b"second"));
    }

    #[test]
    fn crc_mismatch_detected() {
        let mut gz = gzip(b"hello world");
        let crc_at = gz.len() - GZIP_TRAILER_LEN;
        gz[crc_at] ^= 0x55;
        let err = decompress_with(&gz, &Options::default()).unwrap_err();
        assert!(matches!(err, ZlibError::ChecksumMismatch { .. }), "got {:?}", err);
    }

    #[test]
    fn isize_mismatch_detected() {
        let mut gz = gzip(b"hello world");
        let size_at = gz.len() - 4;
        gz[size_at] = gz[size_at].wrapping_add(1);
        let err = decompress_with(&gz, &Options::default()).unwrap_err();
        assert!(
            matches!(err, ZlibError::LengthMismatch { expected: 12, actual: 11 }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn truncated_trailer_detected() {
        let gz = gzip(b"hello world");
        let err = decompress_with(&gz[..gz.len() - 3], &Options::default()).unwrap_err();
        assert!(matches!(err, ZlibError::Truncated), "got {:?}", err);
    }

    #[test]
    fn trailing_garbage_rejected_unless_allowed() {
        let mut gz = gzip(b"data");
        gz.extend_from_slice(&[0, 0, 0, 0]);
        assert!(matches!(
            decompress_with(&gz, &Options::default()),
            Err(ZlibError::TrailingData(4))
        ));
        let d = decompress_with(&gz, &Options::default().with_trailing_data(true)).unwrap();
        assert_eq!(d.data, b"data");
        assert_eq!(d.consumed, gz.len());
    }

    #[test]
    fn output_limit_spans_members() {
        let mut gz = gzip(&[1u8; 60]);
        gz.extend(gzip(&[2u8; 60]));
        let err = decompress_with(&gz, &Options::default().with_max_output(100)).unwrap_err();
        assert!(matches!(err, ZlibError::OutputLimitExceeded(100)));
    }

    #[test]
    fn zlib_input_is_not_gzip() {
        let err = decompress_with(&[0x78, 0x9c, 0x03, 0x00], &Options::default()).unwrap_err();
        assert!(matches!(err, ZlibError::BadHeader(_)));
    }
}
