//! Parallel execution strategy

use crate::{
    chunker::Segment,
    engine::{RedactionEngine, SegmentOutput},
    error::{EngineError, Result},
    executor::Executor,
};
use rayon::prelude::*;

/// Multi-threaded executor over a per-call scoped pool
#[derive(Debug, Clone)]
pub struct ParallelExecutor {
    workers: usize,
}

impl ParallelExecutor {
    /// Executor fanning segments across `workers` threads.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Executor for ParallelExecutor {
    fn run(&self, engine: &RedactionEngine, segments: &[Segment]) -> Result<Vec<SegmentOutput>> {
        // The pool lives only for this call; no global rayon state is
        // touched, so concurrent callers never contend for threads
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        let outputs = pool.install(|| {
            segments
                .par_iter()
                .map(|segment| engine.redact_segment(&segment.text, segment.start))
                .collect()
        });

        Ok(outputs)
    }
}
