//! Orchestration for the redaction pipeline
//!
//! This crate provides chunking, matcher and detector execution,
//! scheduling across execution regimes, and the shared token store.

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod executor;
pub mod scheduler;
pub mod store;

// Re-export key types
pub use chunker::{merge_results, Chunker, Segment};
pub use config::EngineConfig;
pub use detector::{DetectedEntity, Detector, DetectorError};
pub use engine::{RedactionEngine, SegmentOutput};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor, TaskKind};
pub use scheduler::{EngineOutput, Scheduler};
pub use store::{unmask_with, TokenStore};

// Re-export from core for convenience
pub use redactum_core::{Matcher, PiiCategory, RedactionToken};
