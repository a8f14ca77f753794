// src/tfvars/brackets.rs
//! Quote-aware bracket matching over raw bytes.

/// Finds the index of the delimiter matching the opener at `open_at`.
///
/// Scans forward keeping a nesting depth (starting at 1) and a string
/// state machine: delimiters inside single- or double-quoted strings are
/// ignored, and a backslash escape consumes exactly one following byte.
/// Returns `None` if the buffer ends before the depth reaches zero.
///
/// Byte-index based: the block grammar is ASCII-delimited, and UTF-8
/// continuation bytes never collide with ASCII delimiters or quotes.
#[must_use]
pub fn find_matching(text: &str, open_at: usize, open: u8, close: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut in_string = false;
    let mut quote = 0u8;
    let mut escape = false;

    let mut i = open_at + 1;
    while i < bytes.len() {
        let c = bytes[i];
        if escape {
            escape = false;
            i += 1;
            continue;
        }
        if in_string {
            if c == b'\\' {
                escape = true;
            } else if c == quote {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if c == b'"' || c == b'\'' {
            in_string = true;
            quote = c;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
