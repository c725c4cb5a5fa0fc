//! Layered error types

use redactum_core::CoreError;
use thiserror::Error;

/// Engine-level errors (orchestration layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Domain layer error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Worker pool could not be built
    #[error("thread pool error: {0}")]
    ThreadPool(String),

    /// A batch or chunk unit failed; siblings are unaffected
    #[error("task {index} failed: {reason}")]
    TaskFailed {
        /// Index of the failed unit in the caller's input order
        index: usize,
        /// Why the unit failed
        reason: String,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
