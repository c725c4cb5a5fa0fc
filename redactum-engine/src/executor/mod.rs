//! Execution strategies for segment redaction

use crate::chunker::Segment;
use crate::engine::{RedactionEngine, SegmentOutput};
use crate::error::Result;
use std::fmt;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

// Re-export executors
#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution regime selected for one redact call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run on the calling thread or task
    Inline,
    /// Whole call moved off the async runtime onto a blocking worker
    Offloaded,
    /// Split into segments and fanned out
    Chunked,
}

impl ExecutionMode {
    /// Lowercase name as reported in output metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Inline => "inline",
            ExecutionMode::Offloaded => "offloaded",
            ExecutionMode::Chunked => "chunked",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nature of a batch work unit; selects the pool flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Local pattern matching, saturates a core
    CpuBound,
    /// Detector-backed, dominated by waiting on the network
    IoBound,
}

/// Trait for chunk fan-out strategies
pub trait Executor: Send + Sync {
    /// Redact each segment, preserving segment order in the output.
    fn run(&self, engine: &RedactionEngine, segments: &[Segment]) -> Result<Vec<SegmentOutput>>;
}

/// Select the execution regime from the input length in characters.
///
/// Inputs longer than `chunk_size` are chunked; shorter inputs at or
/// above `async_threshold` are offloaded whole (`0` offloads always);
/// anything smaller runs inline for latency.
pub fn select_mode(char_len: usize, chunk_size: usize, async_threshold: usize) -> ExecutionMode {
    if char_len > chunk_size {
        ExecutionMode::Chunked
    } else if char_len >= async_threshold {
        ExecutionMode::Offloaded
    } else {
        ExecutionMode::Inline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_input_runs_inline() {
        assert_eq!(select_mode(10, 5000, 1000), ExecutionMode::Inline);
        assert_eq!(select_mode(999, 5000, 1000), ExecutionMode::Inline);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(select_mode(1000, 5000, 1000), ExecutionMode::Offloaded);
        assert_eq!(select_mode(4999, 5000, 1000), ExecutionMode::Offloaded);
    }

    #[test]
    fn test_zero_threshold_always_offloads() {
        assert_eq!(select_mode(1, 5000, 0), ExecutionMode::Offloaded);
        assert_eq!(select_mode(0, 5000, 0), ExecutionMode::Offloaded);
    }

    #[test]
    fn test_oversized_input_chunks() {
        assert_eq!(select_mode(5001, 5000, 1000), ExecutionMode::Chunked);
        assert_eq!(select_mode(100_000, 5000, 0), ExecutionMode::Chunked);
    }

    #[test]
    fn test_chunk_size_boundary_stays_unchunked() {
        assert_eq!(select_mode(5000, 5000, 1000), ExecutionMode::Offloaded);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(ExecutionMode::Inline.to_string(), "inline");
        assert_eq!(ExecutionMode::Offloaded.to_string(), "offloaded");
        assert_eq!(ExecutionMode::Chunked.to_string(), "chunked");
    }
}
