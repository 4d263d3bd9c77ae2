// src/util.rs — Shared utility functions

/// Longest prefix of `s` that fits in `max_len` bytes without splitting a char.
fn floor_char_boundary(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// One-line preview of a prompt for log output.
///
/// Whitespace runs (including newlines) collapse to a single space; the result
/// is cut at `max_len` bytes on a UTF-8 boundary and marked with `...` when cut.
pub fn log_preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = floor_char_boundary(&flat, max_len);
    if cut.len() < flat.len() {
        format!("{}...", cut)
    } else {
        flat
    }
}
