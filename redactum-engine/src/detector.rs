//! External detector capability
//!
//! A detector is a remote PII recognition service consumed through a
//! narrow async interface. The pipeline never performs I/O itself; it
//! hands a segment to the detector and splices the reported entities
//! locally. Authentication and transport belong to the implementation.

use async_trait::async_trait;
use thiserror::Error;

/// A PII entity reported by a detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedEntity {
    /// The sensitive substring
    pub text: String,
    /// Service-reported category label (e.g. "Email", "PhoneNumber")
    pub category: String,
    /// Byte offset of the entity start within the analyzed text
    pub begin_offset: usize,
    /// Byte offset one past the entity end
    pub end_offset: usize,
    /// Service-reported confidence in [0, 1]
    pub confidence: f64,
}

/// Errors a detector call can surface.
///
/// The engine absorbs these into an empty entity set for the affected
/// segment; they never abort a redaction call.
#[derive(Error, Debug)]
pub enum DetectorError {
    /// The service could not be reached or refused the call
    #[error("detector unavailable: {0}")]
    Unavailable(String),

    /// The service responded with something the client could not use
    #[error("detector response invalid: {0}")]
    InvalidResponse(String),
}

/// Remote PII detection capability.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Analyze `text` and return every entity found, with offsets
    /// relative to `text`.
    async fn detect(&self, text: &str) -> Result<Vec<DetectedEntity>, DetectorError>;
}
