//! Credential value cleanup
//!
//! Values copied through shells, `.env` files and password managers pick up quotes,
//! literal `\n` sequences and stray line breaks.

fn is_edge_noise(c: char) -> bool {
    c.is_whitespace() || c == '"' || c == '\''
}

/// Strip quoting and line-break debris from a credential value.
///
/// 1. trim whitespace and quote characters at both ends
/// 2. drop literal `\n`, `\r`, `\t` escape sequences
/// 3. drop real CR, LF and TAB characters
/// 4. trim again
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim_matches(is_edge_noise);
    let unescaped = trimmed
        .replace("\\n", "")
        .replace("\\r", "")
        .replace("\\t", "");
    let flat: String = unescaped
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect();
    flat.trim_matches(is_edge_noise).to_string()
}
