//! Word-boundary text chunking
//!
//! Splits oversized input into contiguous, non-overlapping segments that
//! prefer to break after a space so a sensitive value is never cut in
//! half. Window arithmetic counts characters; recorded offsets are byte
//! positions into the original text, and every split point lands on a
//! char boundary.

use redactum_core::RedactionToken;

/// A slice of the original input plus its absolute byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The segment text
    pub text: String,
    /// Byte offset of this segment in the original input
    pub start: usize,
}

/// Splits text into bounded segments.
#[derive(Debug, Clone)]
pub struct Chunker {
    max_chars: usize,
}

impl Chunker {
    /// Create a chunker with the given window size in characters.
    /// A zero size is clamped to one; the window must always advance.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars: max_chars.max(1),
        }
    }

    /// Split `text` into segments of at most `max_chars` characters.
    ///
    /// Input at or under the limit comes back as one segment at offset 0.
    /// Otherwise each window backs off to the last space inside it (the
    /// space stays with the left segment); a window with no usable space
    /// splits at the hard limit. Concatenating the segments reproduces
    /// the input exactly.
    pub fn chunk_text(&self, text: &str) -> Vec<Segment> {
        if text.chars().count() <= self.max_chars {
            return vec![Segment {
                text: text.to_string(),
                start: 0,
            }];
        }

        let mut segments = Vec::new();
        let mut start = 0;

        while start < text.len() {
            let remaining = &text[start..];
            let window = remaining
                .char_indices()
                .nth(self.max_chars)
                .map(|(i, _)| i)
                .unwrap_or(remaining.len());
            let mut end = start + window;

            if end < text.len() {
                // Break after the last space in the window; a space at
                // the window start does not count
                if let Some(space) = text[start..end].rfind(' ') {
                    if space > 0 {
                        end = start + space + 1;
                    }
                }
            }

            segments.push(Segment {
                text: text[start..end].to_string(),
                start,
            });
            start = end;
        }

        segments
    }
}

/// Merge per-segment outputs back into one result.
///
/// Straight concatenation in segment order; there is no overlap to
/// reconcile. A single segment passes through unchanged.
pub fn merge_results(
    results: Vec<(String, Vec<RedactionToken>)>,
) -> (String, Vec<RedactionToken>) {
    if results.len() == 1 {
        return results.into_iter().next().unwrap_or_default();
    }

    let mut merged = String::with_capacity(results.iter().map(|(t, _)| t.len()).sum());
    let mut all_tokens = Vec::new();

    for (text, tokens) in results {
        merged.push_str(&text);
        all_tokens.extend(tokens);
    }

    (merged, all_tokens)
}
