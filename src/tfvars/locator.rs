// src/tfvars/locator.rs
//! Locates the `nr_nrql_alerts = [ ... ]` assignment inside a file.

use crate::tfvars::brackets;
use regex::Regex;
use std::sync::LazyLock;

pub const BLOCK_KEY: &str = "nr_nrql_alerts";

// Whitespace-tolerant around `=`, no line anchor, word boundary on the left
// so identifiers merely ending in the key do not match.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnr_nrql_alerts\s*=\s*\[").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Byte range of the alert block, from `nr_nrql_alerts` through the
/// matching `]` (end exclusive).
///
/// Recomputed on every load and every save; never cached across edits,
/// since the file may change on disk between operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: usize,
    pub end: usize,
}

/// Finds the block range, or `None` if the assignment is absent or its
/// brackets never balance. A `None` here is "no block to edit", distinct
/// from a parse failure.
#[must_use]
pub fn locate(text: &str) -> Option<BlockRange> {
    let m = BLOCK_RE.find(text)?;
    let open_at = m.end() - 1;
    let close_at = brackets::find_matching(text, open_at, b'[', b']')?;
    Some(BlockRange {
        start: m.start(),
        end: close_at + 1,
    })
}
