//! Line-oriented text surgery shared by the Cargo.toml and Cargo.lock
//! rewriters.
//!
//! These formats are edited with single-line replacements rather than a
//! parse/reserialize cycle, so everything outside the version field stays
//! byte-identical. The helpers here split text into lines that keep their
//! original terminators and locate quoted assignment values within a line.

use std::ops::Range;

/// Split text into lines, each retaining its original terminator.
///
/// Handles `\n`, `\r\n`, and bare `\r`, including files that mix styles.
/// A final line without a terminator is returned as-is. Concatenating the
/// returned slices reproduces the input exactly.
pub fn split_keepends(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..=i]);
                start = i + 1;
                i += 1;
            }
            b'\r' => {
                let end = if i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
                    i + 1
                } else {
                    i
                };
                lines.push(&text[start..=end]);
                start = end + 1;
                i = end + 1;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Split a single line into its body and terminator.
pub fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else if let Some(body) = line.strip_suffix('\r') {
        (body, "\r")
    } else {
        (line, "")
    }
}

/// Locate the quoted value of a `key = "value"` assignment in a line body.
///
/// Returns the byte span of the value (quotes excluded) when the line
/// matches `<ws> key <ws> = <ws> "<value>"` with a non-empty value. Content
/// after the closing quote (trailing comments, further fields) is allowed;
/// callers that require the assignment to span the whole line check the
/// remainder themselves.
pub fn quoted_value_span(line: &str, key: &str) -> Option<Range<usize>> {
    let mut pos = line.len() - line.trim_start().len();
    let rest = line[pos..].strip_prefix(key)?;
    pos += key.len();

    let trimmed = rest.trim_start();
    pos += rest.len() - trimmed.len();
    let rest = trimmed.strip_prefix('=')?;
    pos += 1;

    let trimmed = rest.trim_start();
    pos += rest.len() - trimmed.len();
    let rest = trimmed.strip_prefix('"')?;
    pos += 1;

    let close = rest.find('"')?;
    if close == 0 {
        return None;
    }
    Some(pos..pos + close)
}

/// Replace `span` within `body` with `replacement`.
pub fn splice(body: &str, span: Range<usize>, replacement: &str) -> String {
    format!("{}{}{}", &body[..span.start], replacement, &body[span.end..])
}
