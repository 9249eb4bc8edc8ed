// cli/constants.rs: program identity, size multipliers and display infrastructure.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity ──────────────────────────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "rzlib";

/// Welcome banner shown at verbosity 3+.
pub fn welcome_message() -> String {
    format!(
        "*** {} v{} {}-bit, zlib/gzip decoder ***\n",
        PROGRAM_NAME,
        crate::RZLIB_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    )
}

// ── Size multipliers ──────────────────────────────────────────────────────────
pub const KB: u64 = 1 << 10;
pub const MB: u64 = 1 << 20;
pub const GB: u64 = 1 << 30;

// ── Compressed-file suffixes ──────────────────────────────────────────────────
/// Suffixes stripped to derive an output name, paired with their replacement.
///
/// Checked in order; no entry may be a suffix of a later one.
pub const KNOWN_SUFFIXES: &[(&str, &str)] = &[
    (".zlib", ""),
    (".tgz", ".tar"),
    (".zz", ""),
    (".gz", ""),
    (".z", ""),
];

// ── Environment variables ─────────────────────────────────────────────────────
pub const ENV_MAX_OUTPUT: &str = "RZLIB_MAX_OUTPUT";
pub const ENV_NBWORKERS: &str = "RZLIB_NBWORKERS";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal (downgradable); 3 = non-downgradable; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display helpers ───────────────────────────────────────────────────────────
//
//   displayout!(...)      → stdout
//   display!(...)         → stderr
//   displaylevel!(l, ...) → stderr when display_level() >= l

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
