// arg_utils.rs: small parsing helpers shared by the argument layer.

use crate::cli::constants::{GB, KB, MB};

/// Returns the last path component of `path`, handling both `/` and `\` separators.
pub fn last_name_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Parses an unsigned integer from the start of `s`, optionally followed by a
/// size suffix. Returns `None` if no leading digits are present or the value
/// overflows, or `Some((value, remainder))` with the unconsumed tail of `s`.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
pub fn read_u64_from_str(s: &str) -> Option<(u64, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let mut value: u64 = s[..digits].parse().ok()?;
    let mut rest = &s[digits..];

    let multiplier = match rest.as_bytes().first() {
        Some(b'K') => KB,
        Some(b'M') => MB,
        Some(b'G') => GB,
        _ => 1,
    };
    if multiplier != 1 {
        value = value.checked_mul(multiplier)?;
        rest = &rest[1..];
        rest = rest.strip_prefix('i').unwrap_or(rest);
        rest = rest.strip_prefix('B').unwrap_or(rest);
    }
    Some((value, rest))
}

/// Parses a complete size argument such as `64M`; trailing garbage is an error.
///
/// Shaped for `clap`'s `value_parser`.
pub fn parse_size(s: &str) -> Result<usize, String> {
    match read_u64_from_str(s) {
        Some((value, "")) => {
            usize::try_from(value).map_err(|_| format!("{}: size too large for this platform", s))
        }
        Some((_, rest)) => Err(format!("{}: unexpected characters {:?} after size", s, rest)),
        None => Err(format!("{}: expected a size such as 512K, 64M or 2G", s)),
    }
}
