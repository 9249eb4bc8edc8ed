// config.rs: Compile-time configuration constants.
//
// Runtime knobs live in `Options` (library) and `io::prefs::Prefs` (CLI);
// the values here are the defaults those types start from.

// Size of each output chunk handed to the inflater before the buffer is
// grown again.
pub const INFLATE_CHUNK_SIZE: usize = 32 * 1024;

// Initial output capacity is seeded at this multiple of the compressed
// length. It is only a seed: the buffer keeps growing until the stream ends.
pub const INITIAL_CAPACITY_FACTOR: usize = 4;

// Upper bound on the seeded capacity, so a large input does not trigger a
// huge speculative allocation before anything has been decoded.
pub const INITIAL_CAPACITY_MAX: usize = 64 * 1024 * 1024;

// Largest decompressed size that can be reported through the C ABI
// (`int *new_buf_len`).
pub const C_ABI_MAX_OUTPUT: usize = i32::MAX as usize;

// Extension used for persisted outputs that carry no stored name.
pub const OUTPUT_EXTENSION: &str = ".out";

// Smallest possible gzip member: 10-byte header, 2-byte empty deflate block,
// 8-byte trailer.
pub const GZIP_MIN_LEN: usize = 20;

// Smallest possible zlib stream: 2-byte header, 2-byte empty deflate block,
// 4-byte Adler-32 trailer.
pub const ZLIB_MIN_LEN: usize = 8;

// Default number of worker threads for multi-file CLI runs.
// 1 = sequential; `-T0` picks a count from the physical cores.
pub const NB_WORKERS_DEFAULT: usize = 1;

// Maximum worker count selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;
