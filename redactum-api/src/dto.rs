//! Data Transfer Objects for the API

use redactum_core::RedactionToken;
use std::collections::HashMap;

/// Complete redaction output with tokens and metadata
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactionOutput {
    /// The text with every accepted span replaced by its token id
    pub redacted_text: String,
    /// Tokens emitted by this call, ascending by original start offset
    pub tokens: Vec<RedactionToken>,
    /// Processing metadata
    pub metadata: RedactionMetadata,
}

impl RedactionOutput {
    /// Token id to original value, for this output only.
    ///
    /// Unlike the redactor's token map this covers just the tokens
    /// emitted by the call that produced this output.
    pub fn token_map(&self) -> HashMap<String, String> {
        self.tokens
            .iter()
            .map(|t| (t.id.clone(), t.original_value.clone()))
            .collect()
    }
}

/// Processing metadata with runtime statistics
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactionMetadata {
    /// Characters in the original input
    pub total_chars: usize,
    /// Wall-clock time of the call in milliseconds
    pub processing_time_ms: u64,
    /// Execution regime the call ran under
    pub mode_used: String,
    /// Segment count when the input was chunked
    pub chunks_processed: Option<usize>,
    /// Detector calls that failed and degraded to passthrough
    pub detector_failures: usize,
}
