//! Redaction tokens and deterministic id derivation
//!
//! A token id must be reproducible from `(original_value, start, category)`,
//! opaque enough not to collide with ordinary text, and cheap to compute.
//! The id embeds the uppercase category tag plus eight hex digits of an
//! xxh3 hash, e.g. `[EMAIL_a3f4d9e1]`.

use crate::category::PiiCategory;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// A redacted span and the identifier that replaced it.
///
/// `start` and `end` are byte offsets into the original, pre-redaction
/// input, never into intermediate rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionToken {
    /// Bracketed identifier substituted into the text
    pub id: String,
    /// The sensitive substring that was removed
    pub original_value: String,
    /// Category the span was classified under
    pub category: PiiCategory,
    /// Byte offset of the span start in the original input
    pub start: usize,
    /// Byte offset one past the span end in the original input
    pub end: usize,
}

impl RedactionToken {
    /// Build a token for a local pattern match.
    ///
    /// The hash is keyed by value, absolute position, and category label,
    /// so two categories matching the same text at different positions
    /// never share an id.
    pub fn from_match(value: &str, category: PiiCategory, start: usize, end: usize) -> Self {
        let id = local_token_id(value, start, &category);
        Self {
            id,
            original_value: value.to_string(),
            category,
            start,
            end,
        }
    }

    /// Build a token for a detector-reported entity.
    ///
    /// Detector ids use a distinct derivation keyed by value and position
    /// only; the category enters through the tag. `tag_source` is the raw
    /// detector category string, which keeps the visible prefix faithful
    /// to what the detector reported even when `category` collapses onto
    /// a built-in variant.
    pub fn from_entity(
        value: &str,
        tag_source: &str,
        category: PiiCategory,
        start: usize,
        end: usize,
    ) -> Self {
        let id = detector_token_id(value, start, tag_source);
        Self {
            id,
            original_value: value.to_string(),
            category,
            start,
            end,
        }
    }
}

/// Token id for a local pattern match: `[{TAG}_{hash8}]` over
/// `"{value}_{start}_{label}"`.
pub fn local_token_id(value: &str, start: usize, category: &PiiCategory) -> String {
    let key = format!("{}_{}_{}", value, start, category.label());
    format!("[{}_{}]", category.tag(), short_hash(&key))
}

/// Token id for a detector entity: `[{TAG}_{hash8}]` over `"{value}_{start}"`.
pub fn detector_token_id(value: &str, start: usize, tag_source: &str) -> String {
    let key = format!("{value}_{start}");
    format!("[{}_{}]", tag_source.to_uppercase(), short_hash(&key))
}

/// Eight lowercase hex digits taken from the top half of the 64-bit hash.
fn short_hash(key: &str) -> String {
    let h = xxh3_64(key.as_bytes());
    format!("{:08x}", (h >> 32) as u32)
}
