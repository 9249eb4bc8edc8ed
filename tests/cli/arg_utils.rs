// Integration tests for cli/arg_utils.rs: size and path helpers
//
// Public API under test:
//   `last_name_from_path`: base name of a '/' or '\' separated path
//   `read_u64_from_str`: leading integer with an optional K/M/G suffix
//   `parse_size`: whole-string size used by --max-output

use rzlib::cli::arg_utils::{last_name_from_path, parse_size, read_u64_from_str};

// ─────────────────────────────────────────────────────────────────────────────
// last_name_from_path
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn last_name_unix_and_windows_separators() {
    assert_eq!(last_name_from_path("/var/log/app.log.gz"), "app.log.gz");
    assert_eq!(last_name_from_path(r"C:\data\dump.zz"), "dump.zz");
    assert_eq!(last_name_from_path("mixed/dir\\file.z"), "file.z");
}

#[test]
fn last_name_without_separator_is_unchanged() {
    assert_eq!(last_name_from_path("plain.gz"), "plain.gz");
    assert_eq!(last_name_from_path(""), "");
}

#[test]
fn last_name_trailing_separator_is_empty() {
    assert_eq!(last_name_from_path("dir/"), "");
}

// ─────────────────────────────────────────────────────────────────────────────
// read_u64_from_str
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn read_u64_returns_rest_of_string() {
    assert_eq!(read_u64_from_str("12abc"), Some((12, "abc")));
    assert_eq!(read_u64_from_str("7"), Some((7, "")));
}

#[test]
fn read_u64_suffix_forms() {
    assert_eq!(read_u64_from_str("2K"), Some((2 << 10, "")));
    assert_eq!(read_u64_from_str("2KiB"), Some((2 << 10, "")));
    assert_eq!(read_u64_from_str("3MB"), Some((3 << 20, "")));
    assert_eq!(read_u64_from_str("1G"), Some((1 << 30, "")));
}

#[test]
fn read_u64_rejects_non_numeric_and_overflow() {
    assert_eq!(read_u64_from_str("K"), None);
    assert_eq!(read_u64_from_str(""), None);
    assert_eq!(read_u64_from_str("99999999999999999999"), None);
    assert_eq!(read_u64_from_str("18446744073709551615G"), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// parse_size
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_size_accepts_whole_values() {
    assert_eq!(parse_size("4096"), Ok(4096));
    assert_eq!(parse_size("64M"), Ok(64 << 20));
}

#[test]
fn parse_size_rejects_trailing_garbage() {
    assert!(parse_size("10 MB").is_err());
    assert!(parse_size("10X").is_err());
    assert!(parse_size("").is_err());
}
