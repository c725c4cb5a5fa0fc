//! Engine configuration

use crate::error::{EngineError, Result};

/// Tuning knobs for the scheduling and chunking layer.
///
/// Sizes count characters, matching how callers reason about text, while
/// all recorded offsets are byte positions.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum segment size in characters before chunking kicks in
    pub chunk_size: usize,
    /// Fan chunked and batch work out across a worker pool
    pub parallel: bool,
    /// Worker pool width (None = available hardware concurrency)
    pub max_workers: Option<usize>,
    /// Async calls at or above this many characters are offloaded to a
    /// blocking worker; 0 offloads everything
    pub async_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 5000,
            parallel: true,
            max_workers: None,
            async_threshold: 1000,
        }
    }
}

impl EngineConfig {
    /// Check invariants that must hold before any processing starts.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(EngineError::Config(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.max_workers == Some(0) {
            return Err(EngineError::Config(
                "max_workers must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved worker count for pool construction.
    pub fn worker_count(&self) -> usize {
        match self.max_workers {
            Some(n) => n,
            None => default_worker_count(),
        }
    }
}

#[cfg(feature = "parallel")]
fn default_worker_count() -> usize {
    num_cpus::get()
}

#[cfg(not(feature = "parallel"))]
fn default_worker_count() -> usize {
    1
}
