//! Segment redaction
//!
//! Applies the configured matchers (or a detector) to one segment. Every
//! matcher runs over the original segment text; validated spans are
//! collected, overlaps are resolved by earliest start then matcher order,
//! and the survivors are spliced in a single reverse pass. A matcher can
//! therefore never observe, or match inside, another matcher's token id.

use crate::detector::{DetectedEntity, Detector};
use redactum_core::{Matcher, PiiCategory, RedactionToken};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of redacting one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentOutput {
    /// The rewritten segment text
    pub text: String,
    /// Tokens emitted for this segment, ascending by start offset
    pub tokens: Vec<RedactionToken>,
    /// Whether a detector call for this segment failed and was absorbed
    pub detector_failed: bool,
}

/// A validated span waiting for the splice pass.
struct AcceptedSpan {
    start: usize,
    end: usize,
    text: String,
    priority: usize,
    category: PiiCategory,
}

/// Applies matchers or a detector to individual segments.
pub struct RedactionEngine {
    matchers: Vec<Arc<dyn Matcher>>,
    detector: Option<Arc<dyn Detector>>,
}

impl RedactionEngine {
    /// Engine backed by local matchers, applied in the given order.
    /// Matcher order doubles as overlap priority.
    pub fn with_matchers(matchers: Vec<Arc<dyn Matcher>>) -> Self {
        Self {
            matchers,
            detector: None,
        }
    }

    /// Engine that delegates detection to an external service.
    pub fn with_detector(detector: Arc<dyn Detector>) -> Self {
        Self {
            matchers: Vec::new(),
            detector: Some(detector),
        }
    }

    /// Whether this engine calls out to a detector.
    pub fn uses_detector(&self) -> bool {
        self.detector.is_some()
    }

    /// Redact one segment with the local matchers.
    ///
    /// `base_offset` is the segment's byte offset in the original input;
    /// emitted token positions are absolute.
    pub fn redact_segment(&self, text: &str, base_offset: usize) -> SegmentOutput {
        let mut spans = Vec::new();

        for (priority, matcher) in self.matchers.iter().enumerate() {
            let category = matcher.category();
            for candidate in matcher.find_candidates(text) {
                if matcher.validate(&candidate.text) {
                    spans.push(AcceptedSpan {
                        start: candidate.start,
                        end: candidate.end,
                        text: candidate.text,
                        priority,
                        category: category.clone(),
                    });
                }
            }
        }

        let accepted = resolve_overlaps(spans);
        let mut out = text.to_string();
        let mut tokens = Vec::with_capacity(accepted.len());

        // Splice back to front so earlier offsets stay valid
        for span in accepted.iter().rev() {
            let token = RedactionToken::from_match(
                &span.text,
                span.category.clone(),
                base_offset + span.start,
                base_offset + span.end,
            );
            out.replace_range(span.start..span.end, &token.id);
            tokens.push(token);
        }
        tokens.reverse();

        SegmentOutput {
            text: out,
            tokens,
            detector_failed: false,
        }
    }

    /// Redact one segment, routing through the detector when configured.
    pub async fn redact_segment_async(&self, text: &str, base_offset: usize) -> SegmentOutput {
        match &self.detector {
            Some(detector) => {
                self.redact_with_detector(detector.as_ref(), text, base_offset)
                    .await
            }
            None => self.redact_segment(text, base_offset),
        }
    }

    async fn redact_with_detector(
        &self,
        detector: &dyn Detector,
        text: &str,
        base_offset: usize,
    ) -> SegmentOutput {
        let entities = match detector.detect(text).await {
            Ok(entities) => entities,
            Err(e) => {
                // Degrade to zero entities; the caller sees disclosed
                // under-redaction, not a failed call
                warn!(
                    offset = base_offset,
                    error = %e,
                    "detector call failed, segment passed through unredacted"
                );
                return SegmentOutput {
                    text: text.to_string(),
                    tokens: Vec::new(),
                    detector_failed: true,
                };
            }
        };

        debug!(offset = base_offset, count = entities.len(), "detector entities received");
        apply_entities(text, base_offset, entities)
    }
}

/// Keep the earliest-starting span on overlap; ties go to the lower
/// matcher index. Returns spans ascending by start.
fn resolve_overlaps(mut spans: Vec<AcceptedSpan>) -> Vec<AcceptedSpan> {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(a.priority.cmp(&b.priority)));

    let mut accepted: Vec<AcceptedSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        let claimed = accepted.last().is_some_and(|prev| span.start < prev.end);
        if !claimed {
            accepted.push(span);
        }
    }
    accepted
}

/// Splice detector entities into the segment, descending by offset.
fn apply_entities(
    text: &str,
    base_offset: usize,
    entities: Vec<DetectedEntity>,
) -> SegmentOutput {
    let mut spans: Vec<(usize, DetectedEntity)> = entities
        .into_iter()
        .enumerate()
        .filter(|(_, e)| {
            let sane = e.begin_offset < e.end_offset
                && e.end_offset <= text.len()
                && text.is_char_boundary(e.begin_offset)
                && text.is_char_boundary(e.end_offset);
            if !sane {
                debug!(
                    begin = e.begin_offset,
                    end = e.end_offset,
                    category = %e.category,
                    "dropping entity with unusable offsets"
                );
            }
            sane
        })
        .collect();

    // Earliest start wins; ties resolved by report order
    spans.sort_by(|a, b| a.1.begin_offset.cmp(&b.1.begin_offset).then(a.0.cmp(&b.0)));
    let mut accepted: Vec<DetectedEntity> = Vec::with_capacity(spans.len());
    for (_, entity) in spans {
        let claimed = accepted
            .last()
            .is_some_and(|prev| entity.begin_offset < prev.end_offset);
        if !claimed {
            accepted.push(entity);
        }
    }

    let mut out = text.to_string();
    let mut tokens = Vec::with_capacity(accepted.len());

    for entity in accepted.iter().rev() {
        // The span content is authoritative for the stored value; the
        // reported category string drives both the tag and the mapping
        let value = &text[entity.begin_offset..entity.end_offset];
        let token = RedactionToken::from_entity(
            value,
            &entity.category,
            PiiCategory::from_detector_label(&entity.category),
            base_offset + entity.begin_offset,
            base_offset + entity.end_offset,
        );
        out.replace_range(entity.begin_offset..entity.end_offset, &token.id);
        tokens.push(token);
    }
    tokens.reverse();

    SegmentOutput {
        text: out,
        tokens,
        detector_failed: false,
    }
}
