//! Sequential execution strategy

use crate::{
    chunker::Segment,
    engine::{RedactionEngine, SegmentOutput},
    error::Result,
    executor::Executor,
};

/// Single-threaded executor, segments processed in order
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn run(&self, engine: &RedactionEngine, segments: &[Segment]) -> Result<Vec<SegmentOutput>> {
        Ok(segments
            .iter()
            .map(|segment| engine.redact_segment(&segment.text, segment.start))
            .collect())
    }
}
