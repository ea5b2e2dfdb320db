//! Log sanitization utilities
//!
//! Response bodies can carry record data and echo request parameters,
//! so they are never written to logs or reports in full.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise the first `TRUNCATE_LIMIT` bytes (on a char boundary) with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// First `max_chars` characters of `s`, without any suffix.
pub fn snippet(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Stands in for secrets in anything that gets logged.
pub const REDACTED: &str = "<redacted>";
