// src/tfvars/mod.rs
//! Parser and serializer for the `nr_nrql_alerts` block in auto.tfvars files.
//!
//! Read path: whole-document parse via hcl-rs, with an object-by-object
//! chunked parse as the fallback. Write path: locate the
//! block range and splice a fully re-rendered block over it; every byte
//! outside the range is preserved.

pub mod brackets;
pub mod chunks;
pub mod locator;
pub mod object;
pub mod render;
pub mod structured;

pub use locator::{locate, BlockRange, BLOCK_KEY};
pub use render::{serialize, splice};

use crate::alerts::record::AlertRecord;

/// Parses the alert list out of full file content.
///
/// The structured whole-document parse is advisory: its `None` (for any
/// reason, including parser-internal failure) triggers the chunked parse.
/// `None` from both means the contents are unusable; callers distinguish
/// this from [`locate`] returning `None` (no block at all).
#[must_use]
pub fn parse(text: &str) -> Option<Vec<AlertRecord>> {
    structured::parse_document(text).or_else(|| chunks::parse_in_chunks(text))
}
