//! Growable inflate over `flate2::Decompress`.
//!
//! The decompressed size is never known up front, so output is produced in
//! chunks: the buffer is seeded from the compressed length, and whenever the
//! inflater fills it the buffer is grown with a fallible reservation. Growth
//! stops one byte past the caller's limit so an over-long stream is detected
//! without decoding the rest of it.
//!
//! A zlib stream is handed over whole and `flate2` checks its Adler-32
//! trailer; gzip members are inflated raw and [`crate::gzip`] owns their
//! header and trailer.

use flate2::{Decompress, FlushDecompress, Status};

use crate::config::{INFLATE_CHUNK_SIZE, INITIAL_CAPACITY_FACTOR, INITIAL_CAPACITY_MAX};
use crate::error::ZlibError;
use crate::types::Options;

// ─────────────────────────────────────────────────────────────────────────────
// Output buffer sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Initial capacity for a stream of `input_len` compressed bytes.
pub(crate) fn seed_capacity(input_len: usize, opts: &Options) -> usize {
    let seed = opts.initial_capacity.unwrap_or_else(|| {
        input_len
            .saturating_mul(INITIAL_CAPACITY_FACTOR)
            .clamp(INFLATE_CHUNK_SIZE, INITIAL_CAPACITY_MAX)
    });
    seed.min(opts.limit().saturating_add(1))
}

/// Allocates an empty output buffer with the seeded capacity.
pub(crate) fn output_buffer(input_len: usize, opts: &Options) -> Result<Vec<u8>, ZlibError> {
    let capacity = seed_capacity(input_len, opts);
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| ZlibError::Allocation(capacity))?;
    Ok(out)
}

/// Grows `out` for the next inflate call, never past `limit + 1` bytes.
///
/// Doubles the current length (at least one chunk) so the number of
/// reallocations stays logarithmic in the output size.
fn grow(out: &mut Vec<u8>, limit: usize) -> Result<(), ZlibError> {
    if out.len() > limit {
        return Err(ZlibError::OutputLimitExceeded(limit));
    }
    let ceiling = limit.saturating_add(1);
    let additional = out.len().max(INFLATE_CHUNK_SIZE).min(ceiling - out.len());
    out.try_reserve(additional)
        .map_err(|_| ZlibError::Allocation(out.len().saturating_add(additional)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Inflater
// ─────────────────────────────────────────────────────────────────────────────

/// One DEFLATE stream decoder.
///
/// A fresh `Inflater` is used per zlib stream or gzip member.
pub(crate) struct Inflater {
    stream: Decompress,
}

impl Inflater {
    /// Raw DEFLATE (no zlib header/trailer; the caller owns those).
    pub(crate) fn raw() -> Self {
        Inflater {
            stream: Decompress::new(false),
        }
    }

    /// zlib stream: header, body and Adler-32 trailer. A trailer that does
    /// not match the output surfaces as [`ZlibError::Corrupt`].
    pub(crate) fn zlib() -> Self {
        Inflater {
            stream: Decompress::new(true),
        }
    }

    /// Inflates one complete stream from the front of `input`, appending to
    /// `out`.
    ///
    /// Returns the number of input bytes the stream occupied; bytes past that
    /// point (gzip trailers, further members) are left to the caller. Fails with
    /// [`ZlibError::Truncated`] when `input` ends before the final block and
    /// with [`ZlibError::OutputLimitExceeded`] once `out` grows past `limit`.
    pub(crate) fn inflate_into(
        &mut self,
        input: &[u8],
        out: &mut Vec<u8>,
        limit: usize,
    ) -> Result<usize, ZlibError> {
        let start_in = self.stream.total_in();
        loop {
            if out.len() == out.capacity() {
                grow(out, limit)?;
            }

            let consumed = (self.stream.total_in() - start_in) as usize;
            let before_in = self.stream.total_in();
            let before_out = self.stream.total_out();

            let status = self
                .stream
                .decompress_vec(&input[consumed..], out, FlushDecompress::None)
                .map_err(|e| ZlibError::Corrupt(e.to_string()))?;

            if out.len() > limit {
                return Err(ZlibError::OutputLimitExceeded(limit));
            }

            match status {
                Status::StreamEnd => {
                    return Ok((self.stream.total_in() - start_in) as usize);
                }
                Status::Ok | Status::BufError => {
                    let progressed = self.stream.total_in() != before_in
                        || self.stream.total_out() != before_out;
                    // Room left in `out` and nothing moved: the decoder is
                    // waiting for input that does not exist.
                    if !progressed && out.len() < out.capacity() {
                        return Err(ZlibError::Truncated);
                    }
                }
            }
        }
    }
}
